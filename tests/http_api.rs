//! End-to-end tests over real sockets: status mapping and breaker behavior
//! as seen by an HTTP client.

mod common;

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};

use score_gateway::config::{GatewayConfig, ServiceConfig};
use score_gateway::invoker::{HttpInvoker, MockInvoker};

fn config_with_services(services: Vec<(&str, ServiceConfig)>) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    for (name, service) in services {
        config.services.insert(name.to_string(), service);
    }
    config
}

fn service(endpoint: &str, max_retries: u32, retry_delay_ms: u64) -> ServiceConfig {
    ServiceConfig {
        name: String::new(),
        endpoint: endpoint.to_string(),
        max_retries,
        retry_delay_ms,
    }
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .unwrap()
}

#[tokio::test]
async fn execute_returns_mock_scoring_result() {
    let config = config_with_services(vec![("SocioeconomicScoring", service("", 3, 10))]);
    let invoker = Arc::new(MockInvoker::new(Duration::from_millis(20)));
    let (addr, shutdown) = common::spawn_gateway(config, invoker).await;

    let res = client()
        .post(format!("http://{}/api/scoring/execute", addr))
        .json(&json!({ "serviceName": "SocioeconomicScoring", "payload": {} }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "Success");
    assert_eq!(body["result"]["score"], 750);
    assert_eq!(body["result"]["risk_level"], "low");
    assert_eq!(body["result"]["recommendation"], "approved");
    assert!(body["executionId"].as_str().is_some());
    assert!(body["elapsedMs"].as_u64().unwrap() >= 20);

    shutdown.trigger();
}

#[tokio::test]
async fn unknown_service_maps_to_404_with_name_in_message() {
    let config = config_with_services(vec![("SocioeconomicScoring", service("", 3, 10))]);
    let invoker = Arc::new(MockInvoker::new(Duration::ZERO));
    let (addr, shutdown) = common::spawn_gateway(config, invoker).await;

    let res = client()
        .post(format!("http://{}/api/scoring/execute", addr))
        .json(&json!({ "serviceName": "DoesNotExist", "payload": {} }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 404);
    let body: Value = res.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("DoesNotExist"));

    shutdown.trigger();
}

#[tokio::test]
async fn unimplemented_mock_maps_to_generic_500() {
    // Registered service, but mock mode has no fixture for it.
    let config = config_with_services(vec![("FraudDetector", service("", 3, 10))]);
    let invoker = Arc::new(MockInvoker::new(Duration::ZERO));
    let (addr, shutdown) = common::spawn_gateway(config, invoker).await;

    let res = client()
        .post(format!("http://{}/api/scoring/execute", addr))
        .json(&json!({ "serviceName": "FraudDetector", "payload": {} }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 500);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Internal server error");

    shutdown.trigger();
}

#[tokio::test]
async fn failing_upstream_exhausts_retries_then_opens_circuit() {
    let upstream_calls = Arc::new(AtomicU32::new(0));
    let counter = upstream_calls.clone();
    let upstream = common::start_programmable_upstream(move || {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            (500, r#"{"error":"boom"}"#.to_string())
        }
    })
    .await;

    let endpoint = format!("http://{}/score", upstream);
    let mut config = config_with_services(vec![("Flaky", service(&endpoint, 2, 10))]);
    config.invoker.mock_mode = false;
    // Threshold equals the attempt budget so one request trips the circuit.
    config.breaker.failure_threshold = 3;

    let invoker = Arc::new(HttpInvoker::new(Duration::from_secs(2)).unwrap());
    let (addr, shutdown) = common::spawn_gateway(config, invoker).await;

    // First request: 3 attempts, all 500, terminal ExecutionFailed.
    let res = client()
        .post(format!("http://{}/api/scoring/execute", addr))
        .json(&json!({ "serviceName": "Flaky", "payload": {"applicant": 42} }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 500);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Internal server error");
    assert_eq!(upstream_calls.load(Ordering::SeqCst), 3);

    // Second request: circuit is open, fails fast without touching upstream.
    let res = client()
        .post(format!("http://{}/api/scoring/execute", addr))
        .json(&json!({ "serviceName": "Flaky", "payload": {} }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 503);
    let body: Value = res.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("Flaky"));
    assert_eq!(upstream_calls.load(Ordering::SeqCst), 3);

    shutdown.trigger();
}

#[tokio::test]
async fn real_upstream_success_round_trips_payload() {
    let upstream = common::start_programmable_upstream(|| async {
        (
            200,
            r#"{"average_balance": 25000, "monthly_income": 5000, "risk_factor": 0.3}"#.to_string(),
        )
    })
    .await;

    let endpoint = format!("http://{}/analyze", upstream);
    let mut config = config_with_services(vec![("BankStatementAnalyzer", service(&endpoint, 3, 10))]);
    config.invoker.mock_mode = false;

    let invoker = Arc::new(HttpInvoker::new(Duration::from_secs(2)).unwrap());
    let (addr, shutdown) = common::spawn_gateway(config, invoker).await;

    let res = client()
        .post(format!("http://{}/api/scoring/execute", addr))
        .json(&json!({ "serviceName": "BankStatementAnalyzer", "payload": {"months": 6} }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "Success");
    assert_eq!(body["result"]["average_balance"], 25000);
    assert_eq!(body["result"]["risk_factor"], 0.3);

    shutdown.trigger();
}

#[tokio::test]
async fn health_endpoint_responds() {
    let config = GatewayConfig::default();
    let invoker = Arc::new(MockInvoker::new(Duration::ZERO));
    let (addr, shutdown) = common::spawn_gateway(config, invoker).await;

    let res = client()
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "ok");

    shutdown.trigger();
}
