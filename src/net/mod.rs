//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! configured address:port
//!     → listener.rs (bind; failure is fatal)
//!     → Hand off to HTTP layer (axum accept loop)
//!     → connection.rs (per-session ID and lifetime guard after upgrade)
//! ```

pub mod connection;
pub mod listener;

pub use connection::{ConnectionId, SessionGuard, SessionTracker};
pub use listener::{bind, ListenerError};
