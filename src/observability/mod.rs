//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and echo sessions:
//!     → tracing events (upgrade:, read:, write:, recv: ...)
//!     → echo_session spans carrying the connection ID
//!     → tower-http TraceLayer spans per HTTP exchange (with x-request-id)
//!
//! Consumer:
//!     → logging.rs fmt layer → stdout
//! ```

pub mod logging;

pub use logging::{init_logging, LoggingError};
