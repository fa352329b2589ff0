//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, route dispatch)
//!     → /echo: websocket.rs (handshake, origin policy)
//!              → echo.rs (one loop per upgraded connection)
//!     → /    : page.rs (test page)
//!     → /hc  : page.rs (liveness)
//! ```

pub mod echo;
pub mod page;
pub mod server;
pub mod websocket;

pub use server::{AppState, EchoServer};

/// WebSocket upgrade path.
pub const ECHO_PATH: &str = "/echo";

/// Browser test page path.
pub const HOME_PATH: &str = "/";

/// Liveness probe path.
pub const HC_PATH: &str = "/hc";
