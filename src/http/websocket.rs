//! WebSocket upgrade handling.
//!
//! # Responsibilities
//! - Reject requests without valid upgrade headers
//! - Enforce the configured origin policy
//! - Apply buffer, size and subprotocol options
//! - Hand the upgraded connection to exactly one echo loop
//!
//! A failed handshake is terminal for that request; the echo loop never runs.

use axum::{
    extract::{
        ws::{rejection::WebSocketUpgradeRejection, WebSocket, WebSocketUpgrade},
        State,
    },
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::Instrument;

use crate::config::UpgradeConfig;
use crate::http::echo::run_echo;
use crate::http::server::AppState;
use crate::net::SessionTracker;

/// Origin check failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OriginError {
    #[error("origin {0:?} is not a valid URL")]
    Malformed(String),

    #[error("origin {origin:?} does not match host {host:?}")]
    CrossOrigin { origin: String, host: String },

    #[error("origin {0:?} is not in the allowed list")]
    NotAllowed(String),
}

/// Handler for the echo path.
pub async fn echo_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    upgrade: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    let ws = match upgrade {
        Ok(ws) => ws,
        Err(rejection) => {
            tracing::warn!(status = %rejection.status(), "upgrade: {}", rejection);
            return rejection.into_response();
        }
    };

    if let Err(e) = check_origin(&headers, &state.upgrade.allowed_origins) {
        tracing::warn!(status = %StatusCode::FORBIDDEN, "upgrade: {}", e);
        return (StatusCode::FORBIDDEN, e.to_string()).into_response();
    }

    let sessions = state.sessions.clone();
    configure(ws, &state.upgrade)
        .on_failed_upgrade(|error: axum::Error| {
            tracing::warn!(error = %error, "upgrade: {}", error);
        })
        .on_upgrade(move |socket| serve_session(socket, sessions))
}

/// Own one upgraded connection until it ends.
async fn serve_session(socket: WebSocket, sessions: SessionTracker) {
    let guard = sessions.track();
    let span = tracing::info_span!("echo_session", session = %guard.id());

    async move {
        tracing::debug!(protocol = ?socket.protocol(), "Session opened");
        let end = run_echo(socket, guard.id()).await;
        tracing::debug!(end = ?end, "Session finished");
        drop(guard);
    }
    .instrument(span)
    .await
}

fn configure(ws: WebSocketUpgrade, config: &UpgradeConfig) -> WebSocketUpgrade {
    let ws = ws
        .read_buffer_size(config.read_buffer_size)
        .write_buffer_size(config.write_buffer_size)
        .max_message_size(config.max_message_size)
        .max_frame_size(config.max_frame_size);

    if config.subprotocols.is_empty() {
        ws
    } else {
        ws.protocols(config.subprotocols.clone())
    }
}

/// Decide whether the request's `Origin` may open a session.
///
/// Requests without an `Origin` header are not from browsers and pass.
pub fn check_origin(headers: &HeaderMap, allowed: &[String]) -> Result<(), OriginError> {
    let Some(origin) = headers.get(header::ORIGIN) else {
        return Ok(());
    };
    let origin = String::from_utf8_lossy(origin.as_bytes()).into_owned();

    if !allowed.is_empty() {
        return if allowed
            .iter()
            .any(|a| a == "*" || a.trim_end_matches('/').eq_ignore_ascii_case(&origin))
        {
            Ok(())
        } else {
            Err(OriginError::NotAllowed(origin))
        };
    }

    // Compare the authority as written; a default port is kept if spelled out.
    let uri: Uri = origin
        .parse()
        .map_err(|_| OriginError::Malformed(origin.clone()))?;
    let origin_host = match (uri.scheme(), uri.authority()) {
        (Some(_), Some(authority)) => authority.as_str(),
        _ => return Err(OriginError::Malformed(origin)),
    };

    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default();

    if origin_host.eq_ignore_ascii_case(host) {
        Ok(())
    } else {
        Err(OriginError::CrossOrigin {
            origin,
            host: host.to_string(),
        })
    }
}
