//! Configuration loading from command-line flags.

use clap::Parser;
use thiserror::Error;

use crate::config::schema::{
    EchoConfig, ListenerConfig, ObservabilityConfig, UpgradeConfig, DEFAULT_BUFFER_SIZE,
    DEFAULT_MAX_FRAME_SIZE, DEFAULT_MAX_MESSAGE_SIZE,
};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Parser)]
#[command(name = "ws-echo")]
#[command(about = "WebSocket echo server with a browser test page", long_about = None)]
#[command(version)]
pub struct Args {
    /// HTTP service address
    #[arg(long, default_value = "localhost")]
    pub addr: String,

    /// HTTP service port
    #[arg(long, default_value_t = 8080)]
    pub port: u16,

    /// Origin allowed to open a WebSocket (repeatable, "*" for any)
    #[arg(long = "allowed-origin", value_name = "ORIGIN")]
    pub allowed_origins: Vec<String>,

    /// Subprotocol offered during the handshake (repeatable)
    #[arg(long = "subprotocol", value_name = "NAME")]
    pub subprotocols: Vec<String>,

    #[arg(long, default_value_t = DEFAULT_BUFFER_SIZE)]
    pub read_buffer_size: usize,

    #[arg(long, default_value_t = DEFAULT_BUFFER_SIZE)]
    pub write_buffer_size: usize,

    #[arg(long, default_value_t = DEFAULT_MAX_MESSAGE_SIZE)]
    pub max_message_size: usize,

    #[arg(long, default_value_t = DEFAULT_MAX_FRAME_SIZE)]
    pub max_frame_size: usize,

    /// Log filter directive, e.g. "info" or "ws_echo=debug"
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Convert parsed flags into the configuration schema (unvalidated).
    pub fn into_config(self) -> EchoConfig {
        EchoConfig {
            listener: ListenerConfig {
                address: self.addr,
                port: self.port,
            },
            upgrade: UpgradeConfig {
                allowed_origins: self.allowed_origins,
                subprotocols: self.subprotocols,
                read_buffer_size: self.read_buffer_size,
                write_buffer_size: self.write_buffer_size,
                max_message_size: self.max_message_size,
                max_frame_size: self.max_frame_size,
            },
            observability: ObservabilityConfig {
                log_level: self.log_level,
            },
        }
    }
}

/// Build and validate configuration from parsed flags.
pub fn load_config(args: Args) -> Result<EchoConfig, ConfigError> {
    let config = args.into_config();
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
