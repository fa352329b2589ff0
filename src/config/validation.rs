//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (clap handles syntactic)
//! - Validate value ranges (buffer sizes > 0, port valid)
//! - Validate origin and subprotocol lists
//!
//! Returns all validation errors, not just the first.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::EchoConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener address must not be empty")]
    EmptyAddress,

    #[error("listener port must not be 0")]
    ZeroPort,

    #[error("{field} must be greater than 0")]
    ZeroSize { field: &'static str },

    #[error("max_frame_size ({frame}) exceeds max_message_size ({message})")]
    FrameLargerThanMessage { frame: usize, message: usize },

    #[error("allowed origin {0:?} is not a URL or \"*\"")]
    InvalidOrigin(String),

    #[error("subprotocol {0:?} is not a valid token")]
    InvalidSubprotocol(String),

    #[error("log level {0:?} is not a valid filter directive")]
    InvalidLogLevel(String),
}

/// Check the configuration, collecting every error.
pub fn validate_config(config: &EchoConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.address.trim().is_empty() {
        errors.push(ValidationError::EmptyAddress);
    }
    if config.listener.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }

    let upgrade = &config.upgrade;
    for (field, value) in [
        ("read_buffer_size", upgrade.read_buffer_size),
        ("write_buffer_size", upgrade.write_buffer_size),
        ("max_message_size", upgrade.max_message_size),
        ("max_frame_size", upgrade.max_frame_size),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroSize { field });
        }
    }
    if upgrade.max_frame_size > upgrade.max_message_size {
        errors.push(ValidationError::FrameLargerThanMessage {
            frame: upgrade.max_frame_size,
            message: upgrade.max_message_size,
        });
    }

    for origin in &upgrade.allowed_origins {
        if origin != "*" && url::Url::parse(origin).is_err() {
            errors.push(ValidationError::InvalidOrigin(origin.clone()));
        }
    }

    for protocol in &upgrade.subprotocols {
        if !is_token(protocol) {
            errors.push(ValidationError::InvalidSubprotocol(protocol.clone()));
        }
    }

    if EnvFilter::try_new(&config.observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// RFC 7230 `token`: one or more visible ASCII characters excluding separators.
fn is_token(s: &str) -> bool {
    const SEPARATORS: &[u8] = b"()<>@,;:\\\"/[]?={} \t";
    !s.is_empty()
        && s
            .bytes()
            .all(|b| b.is_ascii_graphic() && !SEPARATORS.contains(&b))
}
