//! Shutdown coordination.
//!
//! Triggering stops the HTTP accept loop in `EchoServer::run`. Upgraded echo
//! sessions are not drained; they keep running until the process exits.

use tokio::sync::broadcast;

/// Stop signal for the echo server's listener.
///
/// `main` triggers it from the signal task; integration tests trigger it when
/// their server handle is dropped.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Number of subscribers still listening.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
