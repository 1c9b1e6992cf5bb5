//! Request execution engine.
//!
//! # Data Flow
//! ```text
//! ExecutionRequest
//!     → registry lookup (fail: ServiceNotFound)
//!     → per attempt:
//!         breaker gate (open: ServiceUnavailable, short-circuits the loop)
//!         → Invoker::invoke
//!         → success: record, return timed ExecutionResult
//!         → failure: record, sleep retry_delay, next attempt
//!     → budget exhausted: ExecutionFailed wrapping the last error
//! ```
//!
//! # Design Decisions
//! - Per-attempt outcomes are tagged values inspected by the loop, never
//!   control flow thrown across the retry boundary
//! - Breaker rejection is checked before every attempt and consumes none
//! - Retry delay is fixed (linear), matching the per-service config
//! - Cancellation drops the future between awaits; breaker state is only
//!   touched after an attempt actually reports an outcome

pub mod types;

pub use types::{ExecutionError, ExecutionRequest, ExecutionResult, ExecutionStatus};

use std::sync::Arc;
use uuid::Uuid;

use crate::breaker::CircuitBreaker;
use crate::invoker::{InvokeError, Invoker};
use crate::registry::ServiceRegistry;

/// Orchestrates config lookup, breaker gating, bounded retry, and timing.
pub struct ExecutionEngine {
    registry: ServiceRegistry,
    breaker: CircuitBreaker,
    invoker: Arc<dyn Invoker>,
}

impl ExecutionEngine {
    pub fn new(
        registry: ServiceRegistry,
        breaker: CircuitBreaker,
        invoker: Arc<dyn Invoker>,
    ) -> Self {
        Self {
            registry,
            breaker,
            invoker,
        }
    }

    /// Shared breaker state, for inspection.
    pub fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }

    /// Registered service configs, for inspection.
    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    /// Execute one logical request, spanning up to `max_retries + 1` attempts.
    pub async fn execute(
        &self,
        request: ExecutionRequest,
    ) -> Result<ExecutionResult, ExecutionError> {
        let config = self
            .registry
            .lookup(&request.service_name)
            .ok_or_else(|| ExecutionError::ServiceNotFound {
                service: request.service_name.clone(),
            })?;

        let started = tokio::time::Instant::now();
        let execution_id = Uuid::new_v4();
        let max_attempts = config.max_retries + 1;

        for attempt in 1..=max_attempts {
            if let Err(rejection) = self.breaker.check(&config.name) {
                tracing::warn!(
                    service = %config.name,
                    execution_id = %execution_id,
                    %rejection,
                    "circuit rejected execution"
                );
                return Err(ExecutionError::ServiceUnavailable {
                    service: config.name.clone(),
                    source: rejection,
                });
            }

            tracing::info!(
                service = %config.name,
                execution_id = %execution_id,
                attempt,
                max_attempts,
                "executing service"
            );

            match self.invoker.invoke(config, &request.payload).await {
                Ok(result) => {
                    self.breaker.record_success(&config.name);
                    let elapsed = started.elapsed();
                    tracing::info!(
                        service = %config.name,
                        execution_id = %execution_id,
                        elapsed_ms = elapsed.as_millis() as u64,
                        "service executed successfully"
                    );
                    return Ok(ExecutionResult {
                        execution_id,
                        result,
                        status: ExecutionStatus::Success,
                        elapsed,
                    });
                }
                Err(InvokeError::MockUnimplemented { service }) => {
                    // Deployment misconfiguration, not a service failure:
                    // no retry, no breaker penalty.
                    return Err(ExecutionError::UnimplementedMock { service });
                }
                Err(err) => {
                    self.breaker.record_failure(&config.name);
                    tracing::error!(
                        service = %config.name,
                        execution_id = %execution_id,
                        attempt,
                        max_attempts,
                        error = %err,
                        "attempt failed"
                    );

                    if attempt == max_attempts {
                        return Err(ExecutionError::ExecutionFailed {
                            attempts: attempt,
                            source: err,
                        });
                    }

                    tokio::time::sleep(config.retry_delay()).await;
                }
            }
        }

        unreachable!("retry loop returns on the final attempt");
    }
}
