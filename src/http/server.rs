//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum Router with the three fixed routes
//! - Wire up middleware (request ID, tracing)
//! - Serve on a bound listener until shutdown

use std::sync::Arc;

use axum::{routing::any, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::{EchoConfig, UpgradeConfig};
use crate::http::page::{hc_handler, home_handler};
use crate::http::websocket::echo_handler;
use crate::http::{ECHO_PATH, HC_PATH, HOME_PATH};
use crate::net::SessionTracker;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upgrade: Arc<UpgradeConfig>,
    pub sessions: SessionTracker,
}

/// HTTP server for the echo service.
pub struct EchoServer {
    router: Router,
    config: EchoConfig,
    sessions: SessionTracker,
}

impl EchoServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: EchoConfig) -> Self {
        let sessions = SessionTracker::new();
        let state = AppState {
            upgrade: Arc::new(config.upgrade.clone()),
            sessions: sessions.clone(),
        };

        Self {
            router: Self::build_router(state),
            config,
            sessions,
        }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Unmatched paths fall through to the test page.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route(ECHO_PATH, any(echo_handler))
            .route(HOME_PATH, any(home_handler))
            .route(HC_PATH, any(hc_handler))
            .fallback(home_handler)
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The router, for driving handlers without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Live echo sessions.
    pub fn sessions(&self) -> SessionTracker {
        self.sessions.clone()
    }

    pub fn config(&self) -> &EchoConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` fires or its sender is dropped.
    ///
    /// Upgraded sessions are not drained; they end with the process.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "Server is ready to handle requests at port {}",
            addr.port()
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!(
            active_sessions = self.sessions.active_count(),
            "HTTP server stopped"
        );
        Ok(())
    }
}
