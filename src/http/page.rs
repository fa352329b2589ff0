//! Plain HTTP responders: the browser test page and the liveness probe.

use std::fmt::Write;

use axum::{
    http::{header, HeaderMap, Method, Uri},
    response::{Html, IntoResponse},
};

use crate::http::ECHO_PATH;

const HOME_TEMPLATE: &str = include_str!("home.html");
const URL_PLACEHOLDER: &str = "{{ws_url}}";

/// Serves the test page with the WebSocket URL for this request's host.
pub async fn home_handler(method: Method, uri: Uri, headers: HeaderMap) -> Html<String> {
    tracing::info!(method = %method, "home endpoint: {}", method);
    Html(render_home(&ws_url(&headers, &uri)))
}

/// Liveness probe.
pub async fn hc_handler(method: Method) -> impl IntoResponse {
    tracing::info!(method = %method, "hc endpoint: {}", method);
    "ok"
}

/// Build `ws://<host>/echo` (or `wss://` behind a TLS-terminating proxy).
pub fn ws_url(headers: &HeaderMap, uri: &Uri) -> String {
    let forwarded_https = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|proto| proto.trim().eq_ignore_ascii_case("https"));
    let scheme = if forwarded_https { "wss" } else { "ws" };

    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .or_else(|| uri.authority().map(|a| a.as_str()))
        .unwrap_or("localhost");

    format!("{scheme}://{host}{ECHO_PATH}")
}

/// Substitute the URL into the page template.
pub fn render_home(ws_url: &str) -> String {
    HOME_TEMPLATE.replace(URL_PLACEHOLDER, &escape_js_string(ws_url))
}

/// Escape for a double-quoted JavaScript string inside an HTML `<script>`.
fn escape_js_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' | '\'' | '<' | '>' | '&' | '`' => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c if c.is_control() || c == '\u{2028}' || c == '\u{2029}' => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}
