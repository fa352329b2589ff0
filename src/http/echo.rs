//! The per-connection echo loop.
//!
//! # State Machine
//! ```text
//! ACTIVE --recv ok, send ok--> ACTIVE
//! ACTIVE --recv err / close / end of stream--> CLOSED
//! ACTIVE --send err--> CLOSED
//! ```
//!
//! The loop owns its connection and releases it on every path into CLOSED.
//! A clean close and an abnormal disconnect are handled the same way.

use std::fmt::Display;

use axum::extract::ws::Message;
use futures_util::{Sink, SinkExt, Stream, StreamExt};

use crate::net::ConnectionId;

/// Why an echo session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    /// Receive side ended: error, close frame, or the peer went away.
    Read,
    /// Writing the echo failed; the message was dropped.
    Write,
}

/// Run the echo loop until the connection ends.
///
/// Each text or binary message is sent back unchanged before the next one is
/// read. Ping and pong frames are answered by the transport and skipped here.
pub async fn run_echo<S, E>(mut socket: S, session: ConnectionId) -> SessionEnd
where
    S: Stream<Item = Result<Message, E>> + Sink<Message, Error = E> + Unpin,
    E: Display,
{
    let end = loop {
        let message = match socket.next().await {
            Some(Ok(message)) => message,
            Some(Err(e)) => {
                tracing::info!(session = %session, error = %e, "read: {}", e);
                break SessionEnd::Read;
            }
            None => {
                tracing::info!(session = %session, "read: connection closed by peer");
                break SessionEnd::Read;
            }
        };

        match &message {
            Message::Text(text) => {
                tracing::info!(session = %session, kind = "text", len = text.as_str().len(), "recv: {}", text.as_str());
            }
            Message::Binary(data) => {
                tracing::info!(
                    session = %session,
                    kind = "binary",
                    len = data.len(),
                    "recv: {}",
                    String::from_utf8_lossy(data)
                );
            }
            Message::Close(frame) => {
                match frame {
                    Some(frame) => tracing::info!(
                        session = %session,
                        code = u16::from(frame.code),
                        "read: close frame received: {}",
                        frame.reason.as_str()
                    ),
                    None => tracing::info!(session = %session, "read: close frame received"),
                }
                break SessionEnd::Read;
            }
            Message::Ping(_) | Message::Pong(_) => continue,
        }

        if let Err(e) = socket.send(message).await {
            tracing::info!(session = %session, error = %e, "write: {}", e);
            break SessionEnd::Write;
        }
    };

    // Best effort; the socket is dropped regardless.
    if let Err(e) = socket.close().await {
        tracing::debug!(session = %session, error = %e, "close: {}", e);
    }
    end
}
