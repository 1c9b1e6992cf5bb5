//! Service registry.
//!
//! # Responsibilities
//! - Hold per-service invocation config (endpoint, retry budget, retry delay)
//! - Look up config by service name
//! - Return explicit no-match rather than a silent default
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(1) name lookup via HashMap
//! - Pure lookup, no behavior

use std::collections::HashMap;

use crate::config::ServiceConfig;

/// Read-only store of per-service configuration, built once at startup.
#[derive(Debug, Default)]
pub struct ServiceRegistry {
    services: HashMap<String, ServiceConfig>,
}

impl ServiceRegistry {
    /// Build the registry from the `[services]` config table.
    ///
    /// The map key is the authoritative service name and is copied into each
    /// entry's `name` field.
    pub fn from_config(services: HashMap<String, ServiceConfig>) -> Self {
        let services = services
            .into_iter()
            .map(|(name, mut config)| {
                config.name = name.clone();
                (name, config)
            })
            .collect();
        Self { services }
    }

    /// Look up a service by name. `None` means the service is unregistered.
    pub fn lookup(&self, name: &str) -> Option<&ServiceConfig> {
        self.services.get(name)
    }

    /// Names of all registered services.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(name: &str) -> ServiceRegistry {
        let mut services = HashMap::new();
        services.insert(
            name.to_string(),
            ServiceConfig {
                name: String::new(),
                endpoint: "http://scoring.internal/api".to_string(),
                max_retries: 3,
                retry_delay_ms: 1000,
            },
        );
        ServiceRegistry::from_config(services)
    }

    #[test]
    fn lookup_fills_name_from_map_key() {
        let registry = registry_with("SocioeconomicScoring");
        let config = registry.lookup("SocioeconomicScoring").unwrap();
        assert_eq!(config.name, "SocioeconomicScoring");
    }

    #[test]
    fn unknown_service_is_none() {
        let registry = registry_with("SocioeconomicScoring");
        assert!(registry.lookup("DoesNotExist").is_none());
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let registry = registry_with("SocioeconomicScoring");
        assert!(registry.lookup("socioeconomicscoring").is_none());
    }
}
