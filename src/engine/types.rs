//! Execution request/result types and the terminal error taxonomy.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::breaker::BreakerRejection;
use crate::invoker::{InvokeError, ResultMap};

/// One logical invocation request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionRequest {
    /// Registered service to invoke.
    pub service_name: String,

    /// Opaque payload forwarded to the service.
    #[serde(default)]
    pub payload: ResultMap,
}

/// Outcome status of a completed execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStatus {
    Success,
    Failed,
}

/// Result of a completed attempt sequence. Immutable once returned.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    /// Unique id for this execution (spans all attempts).
    pub execution_id: Uuid,

    /// Result mapping from the final, successful attempt.
    pub result: ResultMap,

    /// Outcome status.
    pub status: ExecutionStatus,

    /// Wall time spent inside the execution, retries included.
    #[serde(rename = "elapsedMs", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u128(d.as_millis())
}

/// Terminal failure of an execution.
///
/// `InvokeError` never surfaces directly: per-attempt failures are consumed
/// by the retry loop and only reappear wrapped in `Failed` once the retry
/// budget is exhausted.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// Service name has no registry entry. Not retried.
    #[error("Service {service} not found")]
    ServiceNotFound { service: String },

    /// Circuit is open for this service. Fails fast, consumes no attempts.
    #[error("Service {service} is temporarily unavailable due to too many failures")]
    ServiceUnavailable {
        service: String,
        #[source]
        source: BreakerRejection,
    },

    /// Mock mode has no canned result for this service. Not retried.
    #[error("mock for service '{service}' not implemented")]
    UnimplementedMock { service: String },

    /// Retry budget exhausted; wraps the last attempt's failure.
    #[error("Service execution failed after {attempts} attempts")]
    ExecutionFailed {
        attempts: u32,
        #[source]
        source: InvokeError,
    },
}
