//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Parse flags → Validate → Init logging → Bind listener → Serve
//!
//! Shutdown (shutdown.rs, signals.rs):
//!     SIGTERM/SIGINT → Stop accepting → Exit (live sessions end with the process)
//! ```
//!
//! # Design Decisions
//! - Fail fast: a bind failure is fatal
//! - Echo sessions are never drained; there is no cancellation API

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::wait_for_signal;
