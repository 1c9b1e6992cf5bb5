//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check endpoint URLs parse when the real invoker is selected
//! - Validate value ranges (thresholds > 0, bind address parses)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic validation failure.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("listener bind_address '{0}' is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("service '{service}' has an empty endpoint")]
    EmptyEndpoint { service: String },

    #[error("service '{service}' endpoint '{endpoint}' is not a valid URL: {reason}")]
    InvalidEndpoint {
        service: String,
        endpoint: String,
        reason: String,
    },

    #[error("breaker failure_threshold must be at least 1")]
    ZeroFailureThreshold,

    #[error("invoker call_timeout_secs must be at least 1")]
    ZeroCallTimeout,
}

/// Validate a loaded configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    for (name, service) in &config.services {
        if service.endpoint.is_empty() {
            // Mock mode never dials the endpoint, so an empty one is fine there.
            if !config.invoker.mock_mode {
                errors.push(ValidationError::EmptyEndpoint {
                    service: name.clone(),
                });
            }
            continue;
        }
        if let Err(e) = Url::parse(&service.endpoint) {
            errors.push(ValidationError::InvalidEndpoint {
                service: name.clone(),
                endpoint: service.endpoint.clone(),
                reason: e.to_string(),
            });
        }
    }

    if config.breaker.failure_threshold == 0 {
        errors.push(ValidationError::ZeroFailureThreshold);
    }

    if config.invoker.call_timeout_secs == 0 {
        errors.push(ValidationError::ZeroCallTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
