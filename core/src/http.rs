//! Plain-data request model shared by both transport families.
//!
//! # Design
//! Requests are described as owned, inert values. The call surface folds a
//! [`RequestConfig`] into a [`PreparedRequest`] — URL validated, query
//! params encoded — before any transport sees it, so adapters only ever
//! receive requests that are ready to send.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Basic-auth credentials forwarded verbatim to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Auth {
    pub username: String,
    pub password: String,
}

/// Expected response payload encoding. Only the eager family has this knob;
/// the deferred family ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseType {
    Json,
}

/// Caller-supplied acceptance predicate over the response status code. When
/// present, it alone decides acceptance vs. rejection of a completed call.
pub type StatusPredicate = Arc<dyn Fn(u16) -> bool + Send + Sync>;

/// Optional per-call configuration bag. Every field defaults to "absent";
/// validation beyond URL syntax is left to the underlying transport.
#[derive(Clone, Default)]
pub struct RequestConfig {
    pub headers: Vec<(String, String)>,
    pub data: Option<serde_json::Value>,
    pub params: Vec<(String, String)>,
    pub timeout: Option<Duration>,
    pub max_retries: u32,
    pub auth: Option<Auth>,
    pub response_type: Option<ResponseType>,
    pub validate_status: Option<StatusPredicate>,
}

impl RequestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Structured request payload, JSON-encoded on the wire.
    pub fn data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Query parameter appended to the target URL.
    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((name.into(), value.to_string()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = Some(Auth {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    pub fn response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = Some(response_type);
        self
    }

    pub fn validate_status(mut self, predicate: impl Fn(u16) -> bool + Send + Sync + 'static) -> Self {
        self.validate_status = Some(Arc::new(predicate));
        self
    }
}

impl fmt::Debug for RequestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestConfig")
            .field("headers", &self.headers)
            .field("data", &self.data)
            .field("params", &self.params)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("auth", &self.auth)
            .field("response_type", &self.response_type)
            .field("validate_status", &self.validate_status.as_ref().map(|_| "<predicate>"))
            .finish()
    }
}

/// A generic request for [`crate::api::request`]. The method defaults to
/// GET when left unset.
#[derive(Debug, Clone, Default)]
pub struct RequestDescriptor {
    pub method: Option<Method>,
    pub url: String,
    pub config: RequestConfig,
}

impl RequestDescriptor {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            method: None,
            url: url.into(),
            config: RequestConfig::new(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn config(mut self, config: RequestConfig) -> Self {
        self.config = config;
        self
    }
}

/// A transport-ready request: URL already validated and carrying its encoded
/// query string, content type defaulted when a payload is present.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    pub timeout: Option<Duration>,
    pub max_retries: u32,
    pub auth: Option<Auth>,
    pub response_type: Option<ResponseType>,
}
