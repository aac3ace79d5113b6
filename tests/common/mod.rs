//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::time::Duration;

use gea::{demo, Engine, GeaConfig, Shutdown};
use tokio::net::TcpListener;

/// Demo routes, frozen behind an [`Engine`].
pub fn demo_engine() -> Engine {
    let mut engine = Engine::new();
    demo::register(&mut engine).unwrap();
    engine
}

/// Serve `engine` on an ephemeral port; returns its address and the shutdown handle.
#[allow(dead_code)]
pub async fn start_server(engine: Engine) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut config = GeaConfig::default();
    config.listener.bind_address = addr.to_string();

    let server = engine.into_server(config);
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.clone();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Give the accept loop a moment to start.
    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}
