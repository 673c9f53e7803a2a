//! The uniform result shape produced by every transport.
//!
//! # Design
//! The eager family drains the response body inside the adapter; the
//! deferred family hands over an undrained `reqwest::Response`. [`ApiResponse`]
//! hides that split behind one set of async body accessors, so call sites
//! never branch on which family executed the request. Accessors consume the
//! response: a result is produced exactly once per request and its body is
//! drained at most once.

use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Normalized {status, ok, body} result returned by every call.
#[derive(Debug)]
pub struct ApiResponse {
    status: u16,
    ok: bool,
    payload: Payload,
}

#[derive(Debug)]
enum Payload {
    /// Body already drained by the transport.
    Eager(Vec<u8>),
    /// Body still on the wire, pulled on the first accessor call.
    Deferred(reqwest::Response),
}

impl ApiResponse {
    pub(crate) fn eager(status: u16, body: Vec<u8>) -> Self {
        Self {
            status,
            ok: default_ok(status),
            payload: Payload::Eager(body),
        }
    }

    pub(crate) fn deferred(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        Self {
            status,
            ok: default_ok(status),
            payload: Payload::Deferred(response),
        }
    }

    /// Marks the response accepted after the caller's predicate approved it.
    pub(crate) fn accept(&mut self) {
        self.ok = true;
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Acceptance flag: 200..300 unless a caller predicate overrode it.
    pub fn ok(&self) -> bool {
        self.ok
    }

    /// Raw body bytes. Bodiless responses (HEAD) yield an empty vector.
    pub async fn bytes(self) -> Result<Vec<u8>, ApiError> {
        match self.payload {
            Payload::Eager(body) => Ok(body),
            Payload::Deferred(response) => Ok(response.bytes().await?.to_vec()),
        }
    }

    /// Body decoded as UTF-8 text.
    pub async fn text(self) -> Result<String, ApiError> {
        Ok(String::from_utf8(self.bytes().await?)?)
    }

    /// JSON body, or `None` when the response carries no body at all.
    pub async fn body(self) -> Result<Option<serde_json::Value>, ApiError> {
        let bytes = self.bytes().await?;
        if bytes.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// Body decoded into a concrete type. Fails on empty bodies; use
    /// [`ApiResponse::body`] when the response may be bodiless.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let bytes = self.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn default_ok(status: u16) -> bool {
    (200..300).contains(&status)
}
