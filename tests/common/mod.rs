//! Shared helpers for end-to-end tests.

#![allow(dead_code, clippy::panic)]

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use echo_gateway::api;
use echo_gateway::app_state::AppState;
use echo_gateway::config::SessionSettings;

/// Upper bound for any single network wait in tests.
pub const TIMEOUT: Duration = Duration::from_secs(5);

/// WebSocket client stream type.
pub type WsStream =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

/// Boots a server with the default routes on an ephemeral port.
pub async fn spawn_server(static_root: &Path, session: SessionSettings) -> SocketAddr {
    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind ephemeral port");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("local addr");
    };
    let Ok(router) = api::default_router() else {
        panic!("default routes register");
    };
    let state = AppState::new(router, static_root, session);
    tokio::spawn(api::serve(listener, state, std::future::pending()));
    addr
}

/// Boots a server with no static files and default session settings.
pub async fn spawn_default() -> SocketAddr {
    spawn_server(Path::new("/nonexistent-static-root"), SessionSettings::default()).await
}

/// Opens a WebSocket to `/sock`.
pub async fn connect(addr: SocketAddr) -> WsStream {
    let url = format!("ws://{addr}/sock");
    let Ok(Ok((stream, _response))) =
        tokio::time::timeout(TIMEOUT, tokio_tungstenite::connect_async(url)).await
    else {
        panic!("websocket handshake failed");
    };
    stream
}
