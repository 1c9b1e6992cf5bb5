//! Resilient invocation gateway for external scoring services.
//!
//! Forwards named, configuration-driven requests to external scoring
//! services, tolerating transient failures and shielding callers from a
//! cascading failure of a downstream dependency.

// Core subsystems
pub mod config;
pub mod engine;
pub mod http;
pub mod invoker;
pub mod registry;

// Failure policy
pub mod breaker;

// Cross-cutting concerns
pub mod lifecycle;

pub use breaker::{BreakerState, CircuitBreaker};
pub use config::GatewayConfig;
pub use engine::{ExecutionEngine, ExecutionError, ExecutionRequest, ExecutionResult};
pub use http::HttpServer;
pub use invoker::{HttpInvoker, Invoker, MockInvoker};
pub use lifecycle::Shutdown;
pub use registry::ServiceRegistry;
