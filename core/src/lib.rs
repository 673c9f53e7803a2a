//! Uniform request/response shim over two HTTP client families.
//!
//! # Overview
//! Test suites in this workspace talk to an HTTP API through one call
//! surface ([`api`]) regardless of which underlying client executes the
//! round trip. One client family resolves the response body at call time;
//! the other exposes deferred accessor methods. [`ApiResponse`] hides that
//! difference behind a single {status, ok, body} shape so equivalent test
//! cases read identically over both.
//!
//! # Design
//! - Requests are plain data ([`http`] module), prepared — URL validated,
//!   params encoded — before any network call.
//! - [`Transport`] is the only seam between the call surface and the
//!   underlying clients; call sites never inspect which adapter ran.
//! - The execution context ([`ApiContext`]) is borrowed per call, owns no
//!   mutable state, and is torn down by the test case that created it.
//! - No retries, pooling, or cross-call coordination anywhere; every call is
//!   one awaited round trip.

pub mod api;
pub mod context;
pub mod error;
pub mod http;
pub mod response;
pub mod transport;

pub use context::{ApiContext, ApiReporter, CallRecord, TracingReporter};
pub use error::ApiError;
pub use http::{Auth, Method, RequestConfig, RequestDescriptor, ResponseType};
pub use response::ApiResponse;
pub use transport::{DeferredTransport, EagerTransport, Transport};
