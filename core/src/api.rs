//! The uniform call surface.
//!
//! # Design
//! One thin wrapper per HTTP method plus a generic [`request`], all funneled
//! through [`send`]. Preparation — URL validation, query-param encoding,
//! content-type defaulting — happens before the transport is touched, so a
//! malformed call never reaches the network. After the round trip the
//! caller's acceptance predicate, when present, alone decides whether the
//! response is returned or rejected.

use std::time::Instant;

use tracing::warn;
use url::Url;

use crate::context::{ApiContext, CallRecord};
use crate::error::ApiError;
use crate::http::{Method, PreparedRequest, RequestConfig, RequestDescriptor};
use crate::response::ApiResponse;

pub async fn get(cx: &ApiContext, url: &str, config: RequestConfig) -> Result<ApiResponse, ApiError> {
    send(cx, Method::Get, url, config).await
}

pub async fn head(cx: &ApiContext, url: &str, config: RequestConfig) -> Result<ApiResponse, ApiError> {
    send(cx, Method::Head, url, config).await
}

pub async fn post(cx: &ApiContext, url: &str, config: RequestConfig) -> Result<ApiResponse, ApiError> {
    send(cx, Method::Post, url, config).await
}

pub async fn put(cx: &ApiContext, url: &str, config: RequestConfig) -> Result<ApiResponse, ApiError> {
    send(cx, Method::Put, url, config).await
}

pub async fn patch(cx: &ApiContext, url: &str, config: RequestConfig) -> Result<ApiResponse, ApiError> {
    send(cx, Method::Patch, url, config).await
}

pub async fn delete(cx: &ApiContext, url: &str, config: RequestConfig) -> Result<ApiResponse, ApiError> {
    send(cx, Method::Delete, url, config).await
}

/// Generic entry point. The method defaults to GET when the descriptor
/// leaves it unset.
pub async fn request(cx: &ApiContext, descriptor: RequestDescriptor) -> Result<ApiResponse, ApiError> {
    let method = descriptor.method.unwrap_or(Method::Get);
    send(cx, method, &descriptor.url, descriptor.config).await
}

/// Shared path behind every wrapper: prepare, execute through the bound
/// transport, apply the acceptance predicate, report.
pub async fn send(
    cx: &ApiContext,
    method: Method,
    url: &str,
    config: RequestConfig,
) -> Result<ApiResponse, ApiError> {
    let prepared = prepare(method, url, &config)?;
    let target = prepared.url.clone();
    let started = Instant::now();

    let mut response = cx.http().execute(prepared).await?;

    let status = response.status();
    if let Some(validate) = &config.validate_status {
        if !validate(status) {
            warn!(method = %method, url = %target, status, "status rejected by acceptance predicate");
            return Err(ApiError::RejectedStatus { status });
        }
        response.accept();
    }

    cx.report(&CallRecord {
        method,
        url: target,
        status,
        ok: response.ok(),
        elapsed: started.elapsed(),
    });
    Ok(response)
}

/// Fold a config into a transport-ready request. Runs entirely before any
/// network call; a failure here means nothing was sent.
fn prepare(method: Method, url: &str, config: &RequestConfig) -> Result<PreparedRequest, ApiError> {
    let mut target = Url::parse(url).map_err(|err| ApiError::InvalidUrl {
        url: url.to_string(),
        reason: err.to_string(),
    })?;
    if !matches!(target.scheme(), "http" | "https") {
        return Err(ApiError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme `{}`", target.scheme()),
        });
    }

    for (name, value) in &config.params {
        target.query_pairs_mut().append_pair(name, value);
    }

    let mut headers = config.headers.clone();
    let has_content_type = headers
        .iter()
        .any(|(name, _)| name.eq_ignore_ascii_case("content-type"));
    if config.data.is_some() && !has_content_type {
        headers.push(("content-type".to_string(), "application/json".to_string()));
    }

    Ok(PreparedRequest {
        method,
        url: String::from(target),
        headers,
        body: config.data.clone(),
        timeout: config.timeout,
        max_retries: config.max_retries,
        auth: config.auth.clone(),
        response_type: config.response_type,
    })
}
