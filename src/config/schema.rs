//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Root configuration for the scoring gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, inbound limits).
    pub listener: ListenerConfig,

    /// External service definitions, keyed by service name.
    pub services: HashMap<String, ServiceConfig>,

    /// Invoker selection and outbound call settings.
    pub invoker: InvokerConfig,

    /// Circuit breaker settings (gateway-global, never per-service).
    pub breaker: BreakerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Total inbound request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Per-service invocation configuration.
///
/// Immutable after load. The service name is the map key in the config file
/// and is copied into `name` when the registry is built.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Service name (filled from the map key, not the config file).
    #[serde(skip)]
    pub name: String,

    /// Endpoint URL the real invoker posts payloads to.
    pub endpoint: String,

    /// Maximum number of retries after the first attempt.
    /// `max_retries = 0` means exactly one attempt.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Fixed delay between attempts in milliseconds (no backoff).
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl ServiceConfig {
    /// Delay between attempts as a `Duration`.
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

/// Invoker selection and outbound call settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InvokerConfig {
    /// Resolve calls against canned fixtures instead of the network.
    pub mock_mode: bool,

    /// Simulated latency of the mock invoker in milliseconds.
    pub mock_latency_ms: u64,

    /// Per-call timeout for the real invoker in seconds.
    pub call_timeout_secs: u64,
}

impl InvokerConfig {
    pub fn mock_latency(&self) -> Duration {
        Duration::from_millis(self.mock_latency_ms)
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self {
            mock_mode: true,
            mock_latency_ms: 500,
            call_timeout_secs: 10,
        }
    }
}

/// Circuit breaker settings.
///
/// One breaker configuration for the whole gateway; per-service state is
/// keyed internally but thresholds are global.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BreakerConfig {
    /// Consecutive failures before the circuit opens.
    pub failure_threshold: u32,

    /// Seconds the circuit stays open before permitting a trial call.
    pub break_secs: u64,
}

impl BreakerConfig {
    pub fn break_duration(&self) -> Duration {
        Duration::from_secs(self.break_secs)
    }
}

impl Default for BreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 3,
            break_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_config_defaults_apply() {
        let config: ServiceConfig =
            toml::from_str(r#"endpoint = "http://scoring.internal/api""#).unwrap();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_delay_ms, 1000);
        assert_eq!(config.retry_delay(), Duration::from_secs(1));
    }

    #[test]
    fn breaker_defaults_match_reference_behavior() {
        let config = BreakerConfig::default();
        assert_eq!(config.failure_threshold, 3);
        assert_eq!(config.break_duration(), Duration::from_secs(30));
    }

    #[test]
    fn minimal_config_parses() {
        let raw = r#"
            [listener]
            bind_address = "127.0.0.1:9000"

            [services.SocioeconomicScoring]
            endpoint = "http://scoring.internal/api"
            max_retries = 2
        "#;
        let config: GatewayConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert!(config.invoker.mock_mode);
        let svc = &config.services["SocioeconomicScoring"];
        assert_eq!(svc.max_retries, 2);
        assert_eq!(svc.retry_delay_ms, 1000);
    }
}
