//! Deterministic mock invoker.
//!
//! Resolves calls against canned per-service fixtures with a fixed simulated
//! latency, so the gateway can run end-to-end without any scoring service
//! deployed behind it.

use std::collections::HashMap;
use std::time::Duration;

use futures_util::future::BoxFuture;
use serde_json::json;

use crate::config::ServiceConfig;
use crate::invoker::{InvokeError, Invoker, ResultMap};

/// Invoker that returns fixed results keyed by service name.
#[derive(Debug, Clone)]
pub struct MockInvoker {
    fixtures: HashMap<String, ResultMap>,
    latency: Duration,
}

impl MockInvoker {
    /// Mock with the built-in scoring fixtures.
    pub fn new(latency: Duration) -> Self {
        let mut fixtures = HashMap::new();
        fixtures.insert(
            "SocioeconomicScoring".to_string(),
            object(json!({
                "score": 750,
                "risk_level": "low",
                "recommendation": "approved",
            })),
        );
        fixtures.insert(
            "BankStatementAnalyzer".to_string(),
            object(json!({
                "average_balance": 25000,
                "monthly_income": 5000,
                "risk_factor": 0.3,
            })),
        );
        Self { fixtures, latency }
    }

    /// Mock with caller-supplied fixtures (tests).
    pub fn with_fixtures(fixtures: HashMap<String, ResultMap>, latency: Duration) -> Self {
        Self { fixtures, latency }
    }
}

fn object(value: serde_json::Value) -> ResultMap {
    match value {
        serde_json::Value::Object(map) => map,
        _ => unreachable!("fixtures are object literals"),
    }
}

impl Invoker for MockInvoker {
    fn invoke<'a>(
        &'a self,
        service: &'a ServiceConfig,
        _payload: &'a ResultMap,
    ) -> BoxFuture<'a, Result<ResultMap, InvokeError>> {
        Box::pin(async move {
            let result = self
                .fixtures
                .get(&service.name)
                .cloned()
                .ok_or_else(|| InvokeError::MockUnimplemented {
                    service: service.name.clone(),
                })?;

            tokio::time::sleep(self.latency).await;
            Ok(result)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(name: &str) -> ServiceConfig {
        ServiceConfig {
            name: name.to_string(),
            endpoint: String::new(),
            max_retries: 0,
            retry_delay_ms: 0,
        }
    }

    #[tokio::test]
    async fn known_service_returns_fixture() {
        let mock = MockInvoker::new(Duration::ZERO);
        let result = mock
            .invoke(&service("SocioeconomicScoring"), &ResultMap::new())
            .await
            .unwrap();
        assert_eq!(result["score"], 750);
        assert_eq!(result["risk_level"], "low");
        assert_eq!(result["recommendation"], "approved");
    }

    #[tokio::test]
    async fn unknown_service_is_unimplemented() {
        let mock = MockInvoker::new(Duration::ZERO);
        let err = mock
            .invoke(&service("FraudDetector"), &ResultMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, InvokeError::MockUnimplemented { .. }));
        assert!(!err.is_retryable());
    }

    #[tokio::test(start_paused = true)]
    async fn simulated_latency_is_applied() {
        let mock = MockInvoker::new(Duration::from_millis(500));
        let start = tokio::time::Instant::now();
        mock.invoke(&service("BankStatementAnalyzer"), &ResultMap::new())
            .await
            .unwrap();
        assert_eq!(start.elapsed(), Duration::from_millis(500));
    }
}
