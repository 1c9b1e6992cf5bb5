//! Circuit breaker state machine.
//!
//! Defines the three states a per-service circuit can be in:
//! - **Closed**: normal operation, calls allowed
//! - **Open**: too many consecutive failures, calls rejected
//! - **HalfOpen**: testing recovery - only ONE trial call allowed

use tokio::time::Instant;

/// State of one service's circuit.
#[derive(Debug, Clone)]
pub enum BreakerState {
    /// Circuit is closed - calls allowed.
    Closed {
        /// Number of consecutive failures.
        consecutive_failures: u32,
    },
    /// Circuit is open - calls rejected until the break elapses.
    Open {
        /// When the circuit was opened.
        opened_at: Instant,
        /// Number of failures that opened the circuit.
        consecutive_failures: u32,
    },
    /// Circuit is half-open - a single trial call is in flight.
    /// Other callers are rejected until the trial reports back.
    HalfOpen {
        /// When the trial call was admitted (for trial timeout).
        started_at: Instant,
    },
}

impl BreakerState {
    /// Short state name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            BreakerState::Closed { .. } => "closed",
            BreakerState::Open { .. } => "open",
            BreakerState::HalfOpen { .. } => "half_open",
        }
    }
}

impl PartialEq for BreakerState {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (
                BreakerState::Closed { consecutive_failures: a },
                BreakerState::Closed { consecutive_failures: b },
            ) if a == b
        ) || matches!(
            (self, other),
            (BreakerState::HalfOpen { .. }, BreakerState::HalfOpen { .. })
        ) || matches!(
            (self, other),
            (
                BreakerState::Open { consecutive_failures: a, .. },
                BreakerState::Open { consecutive_failures: b, .. },
            ) if a == b
        )
    }
}

impl Eq for BreakerState {}

impl Default for BreakerState {
    fn default() -> Self {
        Self::Closed {
            consecutive_failures: 0,
        }
    }
}
