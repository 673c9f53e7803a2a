//! Error taxonomy for the call surface and both transports.
//!
//! # Design
//! No variant is ever recovered from internally — every failure propagates
//! unchanged to the calling test case, which decides pass/fail with its own
//! assertions. Non-2xx statuses are deliberately absent here: a response
//! with any status code is a completed call, and only a caller-supplied
//! acceptance predicate can turn one into `RejectedStatus`.

use thiserror::Error;

/// Errors surfaced by the call surface and the transport adapters.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The URL failed validation before any network call was attempted.
    #[error("invalid url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Network-level failure in the deferred transport (DNS, connect, timeout).
    #[error("deferred transport failure: {0}")]
    Deferred(#[from] reqwest::Error),

    /// Network-level failure in the eager transport (DNS, connect, timeout).
    #[error("eager transport failure: {0}")]
    Eager(#[from] ureq::Error),

    /// The caller's acceptance predicate rejected the response status.
    #[error("status {status} rejected by acceptance predicate")]
    RejectedStatus { status: u16 },

    /// Request payload could not be JSON-encoded, or a response body could
    /// not be decoded as the requested type.
    #[error("json encode/decode failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Response body was requested as text but is not valid UTF-8.
    #[error("response body is not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The blocking worker running an eager round trip was cancelled or
    /// panicked.
    #[error("blocking worker failed: {0}")]
    Blocking(#[from] tokio::task::JoinError),
}
