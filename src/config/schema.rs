//! Configuration schema definitions.
//!
//! The complete configuration of the echo server. Built once at startup from
//! command-line flags and never mutated afterwards.

/// Default read/write buffer size for the WebSocket transport.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Default upper bound for a reassembled message (64 MiB).
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 64 << 20;

/// Default upper bound for a single frame (16 MiB).
pub const DEFAULT_MAX_FRAME_SIZE: usize = 16 << 20;

/// Root configuration for the echo server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EchoConfig {
    /// Listener configuration (bind address and port).
    pub listener: ListenerConfig,

    /// WebSocket handshake and transport options.
    pub upgrade: UpgradeConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerConfig {
    /// Host name or IP to bind (e.g., "localhost").
    pub address: String,

    /// TCP port to bind.
    pub port: u16,
}

impl ListenerConfig {
    /// The `address:port` string handed to the socket layer.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            address: "localhost".to_string(),
            port: 8080,
        }
    }
}

/// Options applied to every WebSocket handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeConfig {
    /// Origins allowed to open a session.
    ///
    /// Empty means same-origin only: the `Origin` host must equal the
    /// request `Host`. The entry `*` accepts any origin.
    pub allowed_origins: Vec<String>,

    /// Subprotocols offered to clients, in order of preference.
    pub subprotocols: Vec<String>,

    /// Read buffer capacity in bytes.
    pub read_buffer_size: usize,

    /// Write buffer capacity in bytes.
    pub write_buffer_size: usize,

    /// Largest message accepted from a client.
    pub max_message_size: usize,

    /// Largest frame accepted from a client.
    pub max_frame_size: usize,
}

impl Default for UpgradeConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            subprotocols: Vec::new(),
            read_buffer_size: DEFAULT_BUFFER_SIZE,
            write_buffer_size: DEFAULT_BUFFER_SIZE,
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Filter directive (e.g. "info", "ws_echo=debug,tower_http=info").
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
