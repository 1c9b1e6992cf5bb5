//! Service invocation capability.
//!
//! # Data Flow
//! ```text
//! ExecutionEngine
//!     → Invoker::invoke(service config, payload)
//!     → mock.rs (canned fixtures, simulated latency)
//!       or http.rs (POST payload to configured endpoint)
//!     → result mapping or InvokeError
//! ```
//!
//! # Design Decisions
//! - The engine is agnostic to which variant is wired in; selection happens
//!   once at construction time, never inside engine logic
//! - One call per invoke; retries belong to the engine
//! - Non-2xx upstream responses are transport failures, same as I/O errors

pub mod http;
pub mod mock;

pub use http::HttpInvoker;
pub use mock::MockInvoker;

use futures_util::future::BoxFuture;
use thiserror::Error;

use crate::config::ServiceConfig;

/// Result mapping returned by external services.
pub type ResultMap = serde_json::Map<String, serde_json::Value>;

/// A single attempt's failure.
#[derive(Debug, Error)]
pub enum InvokeError {
    /// Connection, timeout, or protocol-level failure.
    #[error("transport error calling {endpoint}: {reason}")]
    Transport { endpoint: String, reason: String },

    /// Upstream answered with a non-success status.
    #[error("upstream {endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },

    /// Upstream body was not a JSON object.
    #[error("upstream {endpoint} returned a malformed body: {reason}")]
    MalformedResponse { endpoint: String, reason: String },

    /// Mock mode has no canned result for this service. Never retried.
    #[error("mock for service '{service}' not implemented")]
    MockUnimplemented { service: String },
}

impl InvokeError {
    /// Whether the retry loop may try this call again.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, InvokeError::MockUnimplemented { .. })
    }
}

/// Capability that performs one remote call.
///
/// Implementations must be cancel-safe: dropping the returned future must
/// not leave shared state behind.
pub trait Invoker: Send + Sync {
    /// Perform one call for `service` with the given payload.
    fn invoke<'a>(
        &'a self,
        service: &'a ServiceConfig,
        payload: &'a ResultMap,
    ) -> BoxFuture<'a, Result<ResultMap, InvokeError>>;
}
