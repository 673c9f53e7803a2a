//! The two underlying client families behind the [`Transport`] seam.
//!
//! # Design
//! `EagerTransport` mirrors the client family that resolves the body at call
//! time: the whole round trip runs on the blocking pool and the adapter
//! returns drained bytes. `DeferredTransport` mirrors the family that hands
//! back accessor methods: the response object crosses the seam undrained and
//! the normalizer pulls the body only when asked. Each `execute` performs
//! exactly one successful round trip; only the deferred family re-issues on
//! network-level failures, and only when `max_retries` is explicitly set.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::debug;

use crate::error::ApiError;
use crate::http::{Method, PreparedRequest, ResponseType};
use crate::response::ApiResponse;

/// A single HTTP round trip through one of the underlying client families.
///
/// Adapters receive fully prepared requests and return them to the
/// normalizer unmodified — no status interpretation happens here.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: PreparedRequest) -> Result<ApiResponse, ApiError>;
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Head => reqwest::Method::HEAD,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Adapter over the blocking client. Drains the response body before
/// returning, so the normalized result holds eager bytes.
///
/// This family has no native retry support; `max_retries` is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct EagerTransport;

impl EagerTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Transport for EagerTransport {
    async fn execute(&self, request: PreparedRequest) -> Result<ApiResponse, ApiError> {
        if request.max_retries > 0 {
            debug!(
                max_retries = request.max_retries,
                "eager transport has no retry support; field ignored"
            );
        }
        let (status, body) = tokio::task::spawn_blocking(move || round_trip(&request)).await??;
        Ok(ApiResponse::eager(status, body))
    }
}

/// One blocking round trip through ureq. Runs on the blocking pool.
fn round_trip(request: &PreparedRequest) -> Result<(u16, Vec<u8>), ApiError> {
    // A 4xx/5xx status is a completed call, not an error; the caller's
    // predicate decides acceptance upstream.
    let mut config = ureq::Agent::config_builder().http_status_as_error(false);
    if let Some(timeout) = request.timeout {
        config = config.timeout_global(Some(timeout));
    }
    let agent = config.build().new_agent();

    debug!(method = %request.method, url = %request.url, "issuing eager request");

    let mut response = match request.method {
        Method::Get => with_call_headers(agent.get(&request.url), request).call()?,
        Method::Head => with_call_headers(agent.head(&request.url), request).call()?,
        Method::Delete => with_call_headers(agent.delete(&request.url), request).call()?,
        Method::Post => send_body(with_call_headers(agent.post(&request.url), request), request)?,
        Method::Put => send_body(with_call_headers(agent.put(&request.url), request), request)?,
        Method::Patch => send_body(with_call_headers(agent.patch(&request.url), request), request)?,
    };

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_vec()?;
    debug!(status, "eager response received");
    Ok((status, body))
}

/// Headers, basic auth, and the accept hint apply to every method.
fn with_call_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    request: &PreparedRequest,
) -> ureq::RequestBuilder<B> {
    // An explicit authorization header yields to `auth` when both are given.
    for (name, value) in &request.headers {
        if request.auth.is_some() && name.eq_ignore_ascii_case("authorization") {
            continue;
        }
        builder = builder.header(name, value);
    }
    if let Some(auth) = &request.auth {
        let token = STANDARD.encode(format!("{}:{}", auth.username, auth.password));
        builder = builder.header("authorization", format!("Basic {token}"));
    }
    if let Some(ResponseType::Json) = request.response_type {
        builder = builder.header("accept", "application/json");
    }
    builder
}

fn send_body(
    builder: ureq::RequestBuilder<ureq::typestate::WithBody>,
    request: &PreparedRequest,
) -> Result<ureq::http::Response<ureq::Body>, ApiError> {
    match &request.body {
        Some(data) => Ok(builder.send(serde_json::to_vec(data)?.as_slice())?),
        None => Ok(builder.send_empty()?),
    }
}

/// Adapter over the async client. Hands the undrained response to the
/// normalizer so body accessors stay deferred.
///
/// Honors `max_retries` by re-issuing on network-level send failures only; a
/// response carrying any status code counts as a completed round trip.
#[derive(Debug, Clone, Default)]
pub struct DeferredTransport {
    client: reqwest::Client,
}

impl DeferredTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn builder_for(&self, request: &PreparedRequest) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(reqwest::Method::from(request.method), request.url.as_str());
        // Same precedence as the eager adapter: `auth` wins over an explicit
        // authorization header.
        for (name, value) in &request.headers {
            if request.auth.is_some() && name.eq_ignore_ascii_case("authorization") {
                continue;
            }
            builder = builder.header(name, value);
        }
        if let Some(auth) = &request.auth {
            builder = builder.basic_auth(&auth.username, Some(&auth.password));
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(data) = &request.body {
            builder = builder.json(data);
        }
        builder
    }
}

#[async_trait]
impl Transport for DeferredTransport {
    async fn execute(&self, request: PreparedRequest) -> Result<ApiResponse, ApiError> {
        let mut attempts_left = request.max_retries;
        debug!(method = %request.method, url = %request.url, "issuing deferred request");
        loop {
            match self.builder_for(&request).send().await {
                Ok(response) => {
                    debug!(status = response.status().as_u16(), "deferred response received");
                    return Ok(ApiResponse::deferred(response));
                }
                Err(err) if attempts_left > 0 => {
                    attempts_left -= 1;
                    debug!(error = %err, attempts_left, "deferred send failed, re-issuing");
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}
