//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Build engine → Start listener
//!
//! Shutdown (shutdown.rs):
//!     SIGINT received → broadcast → server drains connections → exit
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
