//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use score_gateway::breaker::CircuitBreaker;
use score_gateway::config::GatewayConfig;
use score_gateway::engine::ExecutionEngine;
use score_gateway::http::HttpServer;
use score_gateway::invoker::Invoker;
use score_gateway::lifecycle::Shutdown;
use score_gateway::registry::ServiceRegistry;

/// Start the gateway on an ephemeral port and return its address plus the
/// shutdown handle that tears it down.
#[allow(dead_code)]
pub async fn spawn_gateway(config: GatewayConfig, invoker: Arc<dyn Invoker>) -> (SocketAddr, Shutdown) {
    let registry = ServiceRegistry::from_config(config.services.clone());
    let breaker = CircuitBreaker::new(config.breaker.clone());
    let engine = Arc::new(ExecutionEngine::new(registry, breaker, invoker));
    let server = HttpServer::new(&config, engine);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}

/// Start a programmable mock upstream. The closure decides status and JSON
/// body per request; returns the bound address.
#[allow(dead_code)]
pub async fn start_programmable_upstream<F, Fut>(f: F) -> SocketAddr
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        // Drain the request before answering.
                        let mut buf = [0u8; 4096];
                        let _ = socket.read(&mut buf).await;

                        let (status, body) = f().await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}
