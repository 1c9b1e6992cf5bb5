//! Scoring gateway entry point.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌────────────────────────────────────────────────┐
//!                    │                 SCORE GATEWAY                   │
//!                    │                                                 │
//!   POST /execute    │  ┌──────┐   ┌──────────┐   ┌────────────────┐  │
//!   ─────────────────┼─▶│ http │──▶│ engine   │──▶│    invoker     │──┼──▶ Scoring
//!                    │  │server│   │ (retry)  │   │ (mock | http)  │  │    Service
//!                    │  └──────┘   └────┬─────┘   └────────────────┘  │
//!                    │                  │                              │
//!                    │        ┌─────────┴─────────┐                    │
//!                    │        ▼                   ▼                    │
//!                    │  ┌──────────┐       ┌──────────┐               │
//!                    │  │ registry │       │ breaker  │               │
//!                    │  │ (config) │       │ (keyed)  │               │
//!                    │  └──────────┘       └──────────┘               │
//!                    └────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use score_gateway::breaker::CircuitBreaker;
use score_gateway::config::{load_config, GatewayConfig};
use score_gateway::engine::ExecutionEngine;
use score_gateway::http::HttpServer;
use score_gateway::invoker::{HttpInvoker, Invoker, MockInvoker};
use score_gateway::lifecycle::Shutdown;
use score_gateway::registry::ServiceRegistry;

#[derive(Debug, Parser)]
#[command(name = "score-gateway", about = "Resilient scoring service gateway")]
struct Args {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Force mock mode on, overriding the config file.
    #[arg(long)]
    mock: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    if args.mock {
        config.invoker.mock_mode = true;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!(
                    "score_gateway={}",
                    config.observability.log_level
                ))
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("score-gateway v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        services = config.services.len(),
        mock_mode = config.invoker.mock_mode,
        "Configuration loaded"
    );

    let invoker: Arc<dyn Invoker> = if config.invoker.mock_mode {
        Arc::new(MockInvoker::new(config.invoker.mock_latency()))
    } else {
        Arc::new(HttpInvoker::new(config.invoker.call_timeout())?)
    };

    let registry = ServiceRegistry::from_config(config.services.clone());
    let breaker = CircuitBreaker::new(config.breaker.clone());
    let engine = Arc::new(ExecutionEngine::new(registry, breaker, invoker));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    let server = HttpServer::new(&config, engine);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
