//! Shared utilities for integration tests.

use std::net::SocketAddr;

use ws_echo::config::EchoConfig;
use ws_echo::http::EchoServer;
use ws_echo::lifecycle::Shutdown;
use ws_echo::net::SessionTracker;

/// A server running on an ephemeral loopback port.
#[allow(dead_code)]
pub struct TestServer {
    pub addr: SocketAddr,
    pub sessions: SessionTracker,
    pub shutdown: Shutdown,
}

impl TestServer {
    #[allow(dead_code)]
    pub fn ws_url(&self) -> String {
        format!("ws://{}/echo", self.addr)
    }

    #[allow(dead_code)]
    pub fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a server with default options.
#[allow(dead_code)]
pub async fn start_server() -> TestServer {
    start_server_with(EchoConfig::default()).await
}

#[allow(dead_code)]
/// Start a server; the listener address in `config` is replaced by 127.0.0.1:0.
pub async fn start_server_with(mut config: EchoConfig) -> TestServer {
    config.listener.address = "127.0.0.1".into();
    config.listener.port = 0;

    let listener = ws_echo::net::bind(&config.listener).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = EchoServer::new(config);
    let sessions = server.sessions();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestServer {
        addr,
        sessions,
        shutdown,
    }
}
