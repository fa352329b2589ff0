//! WebSocket echo server.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌───────────────────────────────────────────────┐
//!                      │                  ECHO SERVER                  │
//!                      │                                               │
//!   Client request     │  ┌──────────┐    ┌──────────────────────┐     │
//!   ───────────────────┼─▶│   net    │───▶│   http dispatcher    │     │
//!                      │  │ listener │    │  /echo   /    /hc    │     │
//!                      │  └──────────┘    └──┬───────┬─────┬─────┘     │
//!                      │                     │       │     │           │
//!                      │                     ▼       ▼     ▼           │
//!                      │              ┌──────────┐ page   "ok"         │
//!                      │              │ upgrader │                     │
//!                      │              └────┬─────┘                     │
//!                      │                   ▼                           │
//!   Echoed frames      │              ┌──────────┐                     │
//!   ◀──────────────────┼──────────────│echo loop │ (one per session)   │
//!                      │              └──────────┘                     │
//!                      │                                               │
//!                      │  Cross-cutting: config · observability ·      │
//!                      │                 lifecycle                     │
//!                      └───────────────────────────────────────────────┘
//! ```

use clap::Parser;

use ws_echo::config::{load_config, Args};
use ws_echo::http::EchoServer;
use ws_echo::lifecycle::{wait_for_signal, Shutdown};
use ws_echo::net;
use ws_echo::observability::init_logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(Args::parse())?;
    init_logging(&config.observability)?;

    tracing::info!(
        address = %config.listener.address,
        port = config.listener.port,
        allowed_origins = ?config.upgrade.allowed_origins,
        subprotocols = ?config.upgrade.subprotocols,
        "Configuration loaded"
    );

    let listener = match net::bind(&config.listener).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, "listen: {}", e);
            std::process::exit(1);
        }
    };

    let shutdown = Shutdown::new();
    let server = EchoServer::new(config);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
