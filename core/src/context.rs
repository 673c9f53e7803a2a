//! Execution-context bundle threaded into every call.
//!
//! # Design
//! Ambient handles travel as an explicit first parameter instead of a global
//! lookup. `ApiContext` bundles the transport that executes requests with an
//! optional reporter that receives a record of each completed call — the
//! counterpart of attaching call artifacts to a test report. The context is
//! borrowed by call sites and torn down by the test case that created it;
//! nothing in it is mutated by the shim.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::http::Method;
use crate::transport::Transport;

/// One completed call, as handed to the reporter.
#[derive(Debug, Clone)]
pub struct CallRecord {
    pub method: Method,
    pub url: String,
    pub status: u16,
    pub ok: bool,
    pub elapsed: Duration,
}

/// Receives a record after every completed call.
pub trait ApiReporter: Send + Sync {
    fn record(&self, call: &CallRecord);
}

/// Reporter that emits each call record as a structured tracing event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ApiReporter for TracingReporter {
    fn record(&self, call: &CallRecord) {
        info!(
            method = %call.method,
            url = %call.url,
            status = call.status,
            ok = call.ok,
            elapsed_ms = call.elapsed.as_millis() as u64,
            "api call completed"
        );
    }
}

/// The handle bundle a test case passes into every call.
#[derive(Clone)]
pub struct ApiContext {
    http: Arc<dyn Transport>,
    reporter: Option<Arc<dyn ApiReporter>>,
}

impl ApiContext {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            http: Arc::new(transport),
            reporter: None,
        }
    }

    pub fn with_reporter(mut self, reporter: impl ApiReporter + 'static) -> Self {
        self.reporter = Some(Arc::new(reporter));
        self
    }

    /// The transport sub-handle, forwarded to whichever adapter was bound.
    pub(crate) fn http(&self) -> &dyn Transport {
        self.http.as_ref()
    }

    pub(crate) fn report(&self, call: &CallRecord) {
        if let Some(reporter) = &self.reporter {
            reporter.record(call);
        }
    }
}

impl fmt::Debug for ApiContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiContext")
            .field("reporter", &self.reporter.is_some())
            .finish_non_exhaustive()
    }
}
