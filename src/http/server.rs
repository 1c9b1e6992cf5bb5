//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the scoring handlers
//! - Wire up middleware (tracing, request timeout)
//! - Dispatch execute requests to the execution engine
//! - Map engine outcomes to HTTP statuses without leaking internal detail

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::GatewayConfig;
use crate::engine::{ExecutionEngine, ExecutionError, ExecutionRequest};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ExecutionEngine>,
}

/// HTTP server for the scoring gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server around an execution engine.
    pub fn new(config: &GatewayConfig, engine: Arc<ExecutionEngine>) -> Self {
        let state = AppState { engine };
        let router = Self::build_router(config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/api/scoring/execute", post(execute_handler))
            .route("/health", get(health_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

/// Execute handler: forwards the request to the engine and maps the outcome.
async fn execute_handler(
    State(state): State<AppState>,
    Json(request): Json<ExecutionRequest>,
) -> Response {
    let service = request.service_name.clone();

    match state.engine.execute(request).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err @ ExecutionError::ServiceNotFound { .. }) => (
            StatusCode::NOT_FOUND,
            Json(ErrorBody {
                message: err.to_string(),
            }),
        )
            .into_response(),
        Err(err @ ExecutionError::ServiceUnavailable { .. }) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorBody {
                message: err.to_string(),
            }),
        )
            .into_response(),
        Err(err) => {
            // Full detail stays in the logs; clients get a generic message.
            tracing::error!(service = %service, error = ?err, "error processing execution request");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    message: "Internal server error".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Liveness probe.
async fn health_handler() -> &'static str {
    "ok"
}
