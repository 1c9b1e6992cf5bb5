//! HTTP boundary subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, timeout + trace layers)
//!     → POST /api/scoring/execute (JSON body)
//!     → ExecutionEngine
//!     → 200 / 404 / 503 / 500 response
//! ```

pub mod server;

pub use server::HttpServer;
