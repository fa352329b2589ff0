//! End-to-end echo sessions over real sockets.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use ws_echo::config::EchoConfig;
use ws_echo::net::SessionTracker;

mod common;

async fn wait_for_sessions(sessions: &SessionTracker, expected: u64) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while sessions.active_count() != expected {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("session count never settled");
}

#[tokio::test]
async fn test_echoes_text_and_binary() {
    let server = common::start_server().await;
    let (mut ws, response) = connect_async(server.ws_url()).await.unwrap();
    assert_eq!(response.status(), 101);

    ws.send(Message::text("Hello world!")).await.unwrap();
    assert_eq!(ws.next().await.unwrap().unwrap(), Message::text("Hello world!"));

    let payload: Vec<u8> = (0..=255u8).cycle().take(1 << 20).collect();
    ws.send(Message::binary(payload.clone())).await.unwrap();
    assert_eq!(ws.next().await.unwrap().unwrap(), Message::binary(payload));

    ws.send(Message::text("")).await.unwrap();
    assert_eq!(ws.next().await.unwrap().unwrap(), Message::text(""));
}

#[tokio::test]
async fn test_preserves_order() {
    let server = common::start_server().await;
    let (mut ws, _) = connect_async(server.ws_url()).await.unwrap();

    for i in 0..100 {
        ws.feed(Message::text(format!("msg-{i}"))).await.unwrap();
    }
    ws.flush().await.unwrap();

    for i in 0..100 {
        let reply = ws.next().await.unwrap().unwrap();
        assert_eq!(reply, Message::text(format!("msg-{i}")));
    }
}

#[tokio::test]
async fn test_client_close_ends_session() {
    let server = common::start_server().await;
    let (mut ws, _) = connect_async(server.ws_url()).await.unwrap();
    wait_for_sessions(&server.sessions, 1).await;

    ws.send(Message::text("last")).await.unwrap();
    assert_eq!(ws.next().await.unwrap().unwrap(), Message::text("last"));

    ws.close(None).await.unwrap();
    match ws.next().await {
        Some(Ok(Message::Close(_))) => {}
        other => panic!("expected close reply, got {other:?}"),
    }
    assert!(matches!(ws.next().await, None | Some(Err(_))));

    wait_for_sessions(&server.sessions, 0).await;
}

#[tokio::test]
async fn test_dropped_client_ends_session() {
    let server = common::start_server().await;
    let (ws, _) = connect_async(server.ws_url()).await.unwrap();
    wait_for_sessions(&server.sessions, 1).await;

    drop(ws);

    wait_for_sessions(&server.sessions, 0).await;
}

#[tokio::test]
async fn test_connections_are_independent() {
    let server = common::start_server().await;
    let (mut a, _) = connect_async(server.ws_url()).await.unwrap();
    let (mut b, _) = connect_async(server.ws_url()).await.unwrap();
    wait_for_sessions(&server.sessions, 2).await;

    a.send(Message::text("from a")).await.unwrap();
    b.send(Message::text("from b")).await.unwrap();

    assert_eq!(b.next().await.unwrap().unwrap(), Message::text("from b"));
    assert_eq!(a.next().await.unwrap().unwrap(), Message::text("from a"));

    // Closing one leaves the other working.
    a.close(None).await.unwrap();
    b.send(Message::text("still here")).await.unwrap();
    assert_eq!(b.next().await.unwrap().unwrap(), Message::text("still here"));
}

#[tokio::test]
async fn test_plain_get_is_rejected() {
    let server = common::start_server().await;
    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    let res = client.get(server.http_url("/echo")).send().await.unwrap();
    assert_eq!(res.status(), 400);

    let res = client.post(server.http_url("/echo")).send().await.unwrap();
    assert_eq!(res.status(), 405);

    assert_eq!(server.sessions.active_count(), 0);
}

#[tokio::test]
async fn test_cross_origin_is_rejected() {
    let server = common::start_server().await;

    let mut request = server.ws_url().into_client_request().unwrap();
    request
        .headers_mut()
        .insert("origin", HeaderValue::from_static("http://evil.example"));

    match connect_async(request).await {
        Err(WsError::Http(response)) => assert_eq!(response.status(), 403),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("cross-origin handshake succeeded"),
    }
    assert_eq!(server.sessions.active_count(), 0);
}

#[tokio::test]
async fn test_same_origin_is_accepted() {
    let server = common::start_server().await;

    let mut request = server.ws_url().into_client_request().unwrap();
    let origin = format!("http://{}", server.addr);
    request
        .headers_mut()
        .insert("origin", HeaderValue::from_str(&origin).unwrap());

    let (mut ws, _) = connect_async(request).await.unwrap();
    ws.send(Message::text("same origin")).await.unwrap();
    assert_eq!(ws.next().await.unwrap().unwrap(), Message::text("same origin"));
}

#[tokio::test]
async fn test_subprotocol_negotiated() {
    let mut config = EchoConfig::default();
    config.upgrade.subprotocols = vec!["echo.v1".into(), "chat".into()];
    let server = common::start_server_with(config).await;

    let mut request = server.ws_url().into_client_request().unwrap();
    request
        .headers_mut()
        .insert("sec-websocket-protocol", HeaderValue::from_static("chat"));

    let (mut ws, response) = connect_async(request).await.unwrap();
    assert_eq!(
        response.headers().get("sec-websocket-protocol").unwrap(),
        "chat"
    );

    ws.send(Message::text("negotiated")).await.unwrap();
    assert_eq!(ws.next().await.unwrap().unwrap(), Message::text("negotiated"));
}

#[tokio::test]
async fn test_ping_answered_not_echoed() {
    let server = common::start_server().await;
    let (mut ws, _) = connect_async(server.ws_url()).await.unwrap();

    ws.send(Message::Ping(b"heartbeat".to_vec().into())).await.unwrap();
    ws.send(Message::text("after ping")).await.unwrap();

    assert_eq!(
        ws.next().await.unwrap().unwrap(),
        Message::Pong(b"heartbeat".to_vec().into())
    );
    assert_eq!(ws.next().await.unwrap().unwrap(), Message::text("after ping"));
}

#[tokio::test]
async fn test_oversize_frame_ends_session() {
    let mut config = EchoConfig::default();
    config.upgrade.max_message_size = 1024;
    config.upgrade.max_frame_size = 1024;
    let server = common::start_server_with(config).await;

    let (mut ws, _) = connect_async(server.ws_url()).await.unwrap();
    wait_for_sessions(&server.sessions, 1).await;

    ws.send(Message::binary(vec![7u8; 4096])).await.unwrap();

    match ws.next().await {
        Some(Ok(Message::Close(_))) | Some(Err(_)) | None => {}
        Some(Ok(other)) => panic!("oversize frame was answered with {other:?}"),
    }
    wait_for_sessions(&server.sessions, 0).await;
}
