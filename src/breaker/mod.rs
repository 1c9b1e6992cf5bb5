//! Circuit breaker with per-service keyed state.
//!
//! # States
//! - Closed: normal operation, calls pass through
//! - Open: service assumed down, calls fail fast
//! - Half-Open: testing if the service recovered
//!
//! # State Transitions
//! ```text
//! Closed → Open: consecutive_failures >= threshold
//! Open → Half-Open: after break duration
//! Half-Open → Closed: trial call succeeds
//! Half-Open → Open: trial call fails
//! ```
//!
//! # Design Decisions
//! - Per-service circuit (keyed state store, never global)
//! - Fail fast in Open state (callers never wait out the break)
//! - Single trial call in Half-Open (prevents hammering a recovering service)
//! - All transitions happen under the per-key shard lock, so two concurrent
//!   callers can never both trip or both probe the same circuit

pub mod state;

pub use state::BreakerState;

use dashmap::DashMap;
use thiserror::Error;
use tokio::time::Instant;

use crate::config::BreakerConfig;

/// Why the breaker rejected a call.
#[derive(Debug, Clone, Error)]
pub enum BreakerRejection {
    #[error("circuit for '{service}' is open after {consecutive_failures} consecutive failures")]
    Open {
        service: String,
        consecutive_failures: u32,
    },

    #[error("circuit for '{service}' is testing recovery (trial call in flight)")]
    TrialInFlight { service: String },
}

/// Per-service circuit breaker shared across all concurrent executions.
///
/// State for service A never blocks operations on service B: keys live in
/// independent map entries and locking is per shard.
#[derive(Debug)]
pub struct CircuitBreaker {
    states: DashMap<String, BreakerState>,
    config: BreakerConfig,
}

impl CircuitBreaker {
    pub fn new(config: BreakerConfig) -> Self {
        Self {
            states: DashMap::new(),
            config,
        }
    }

    /// Check whether a call to `service` may proceed.
    ///
    /// Performs the Open → HalfOpen transition when the break duration has
    /// elapsed; the caller that triggers it becomes the trial call. While a
    /// trial is in flight, other callers are rejected. A trial that never
    /// reports back (caller cancelled) is replaced once the break duration
    /// passes again, so cancellation cannot wedge the circuit.
    pub fn check(&self, service: &str) -> Result<(), BreakerRejection> {
        let break_duration = self.config.break_duration();
        let mut entry = self
            .states
            .entry(service.to_string())
            .or_insert_with(BreakerState::default);

        match *entry {
            BreakerState::Closed { .. } => Ok(()),
            BreakerState::Open {
                opened_at,
                consecutive_failures,
            } => {
                if opened_at.elapsed() >= break_duration {
                    tracing::info!(service = %service, "circuit transitioning to half-open");
                    *entry = BreakerState::HalfOpen {
                        started_at: Instant::now(),
                    };
                    Ok(())
                } else {
                    Err(BreakerRejection::Open {
                        service: service.to_string(),
                        consecutive_failures,
                    })
                }
            }
            BreakerState::HalfOpen { started_at } => {
                if started_at.elapsed() >= break_duration {
                    tracing::warn!(
                        service = %service,
                        "circuit trial call never reported, admitting a new trial"
                    );
                    *entry = BreakerState::HalfOpen {
                        started_at: Instant::now(),
                    };
                    Ok(())
                } else {
                    Err(BreakerRejection::TrialInFlight {
                        service: service.to_string(),
                    })
                }
            }
        }
    }

    /// Record a successful call.
    ///
    /// Closed: resets the failure counter. HalfOpen: closes the circuit.
    pub fn record_success(&self, service: &str) {
        let mut entry = self
            .states
            .entry(service.to_string())
            .or_insert_with(BreakerState::default);

        match *entry {
            BreakerState::Closed { .. } => {
                *entry = BreakerState::Closed {
                    consecutive_failures: 0,
                };
            }
            BreakerState::HalfOpen { .. } => {
                tracing::info!(service = %service, "circuit closing after successful recovery");
                *entry = BreakerState::Closed {
                    consecutive_failures: 0,
                };
            }
            BreakerState::Open { .. } => {
                // A success cannot normally be observed while open; leave the
                // circuit to recover through its half-open trial.
                tracing::warn!(service = %service, "success recorded while circuit open");
            }
        }
    }

    /// Record a failed call.
    ///
    /// Closed: increments the counter, opening the circuit at the threshold.
    /// HalfOpen: reopens the circuit immediately.
    pub fn record_failure(&self, service: &str) {
        let threshold = self.config.failure_threshold;
        let mut entry = self
            .states
            .entry(service.to_string())
            .or_insert_with(BreakerState::default);

        match *entry {
            BreakerState::Closed {
                consecutive_failures,
            } => {
                let failures = consecutive_failures.saturating_add(1);
                if failures >= threshold {
                    tracing::warn!(
                        service = %service,
                        failures,
                        "circuit opening after consecutive failures"
                    );
                    *entry = BreakerState::Open {
                        opened_at: Instant::now(),
                        consecutive_failures: failures,
                    };
                } else {
                    *entry = BreakerState::Closed {
                        consecutive_failures: failures,
                    };
                }
            }
            BreakerState::HalfOpen { .. } => {
                tracing::warn!(service = %service, "circuit reopening after failed trial call");
                *entry = BreakerState::Open {
                    opened_at: Instant::now(),
                    consecutive_failures: 1,
                };
            }
            BreakerState::Open {
                opened_at,
                consecutive_failures,
            } => {
                // Late failure report while already open; keep counting but do
                // not extend the break.
                *entry = BreakerState::Open {
                    opened_at,
                    consecutive_failures: consecutive_failures.saturating_add(1),
                };
            }
        }
    }

    /// Current state for a service (Closed with zero failures if untracked).
    pub fn state(&self, service: &str) -> BreakerState {
        self.states
            .get(service)
            .map(|entry| entry.clone())
            .unwrap_or_default()
    }

    /// Consecutive failure count for a service.
    pub fn consecutive_failures(&self, service: &str) -> u32 {
        match self.state(service) {
            BreakerState::Closed {
                consecutive_failures,
            }
            | BreakerState::Open {
                consecutive_failures,
                ..
            } => consecutive_failures,
            BreakerState::HalfOpen { .. } => 0,
        }
    }
}
