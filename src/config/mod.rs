//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! command-line flags
//!     → args.rs (parse with clap)
//!     → validation.rs (semantic checks)
//!     → EchoConfig (validated, immutable)
//!     → UpgradeConfig shared via Arc with the upgrader
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - Every field has a default so no flag is required
//! - Validation separates syntactic (clap) from semantic checks

pub mod args;
pub mod schema;
pub mod validation;

pub use args::{load_config, Args, ConfigError};
pub use schema::{EchoConfig, ListenerConfig, ObservabilityConfig, UpgradeConfig};
