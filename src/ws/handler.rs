//! WebSocket upgrade handler for `GET /sock`.

use std::net::SocketAddr;

use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{ConnectInfo, FromRequestParts, Request};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use futures_util::FutureExt;

use super::connection::EchoSession;
use crate::app_state::AppState;
use crate::config::SessionSettings;
use crate::error::UpgradeError;
use crate::routing::HandlerFuture;

/// `GET /sock` — Upgrade the connection and start an echo session.
pub fn sock_handler(state: AppState, request: Request) -> HandlerFuture {
    async move {
        let (mut parts, _body) = request.into_parts();
        match upgrade(&mut parts, &state.session).await {
            Ok(response) => response,
            Err(err) => {
                match &err {
                    UpgradeError::Handshake(reason) => {
                        tracing::debug!(%reason, "rejected non-handshake request");
                    }
                    UpgradeError::Transport(_) => tracing::warn!(error = %err, "upgrade aborted"),
                }
                err.into_response()
            }
        }
    }
    .boxed()
}

/// Validates the handshake in `parts` and, on success, schedules an
/// [`EchoSession`] on the upgraded connection.
///
/// The returned response is the `101 Switching Protocols` reply.
///
/// # Errors
///
/// Returns [`UpgradeError::Handshake`] when the request is not a WebSocket
/// handshake and [`UpgradeError::Transport`] when the underlying connection
/// cannot be upgraded.
pub async fn upgrade(
    parts: &mut Parts,
    settings: &SessionSettings,
) -> Result<Response, UpgradeError> {
    let remote = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let ws = WebSocketUpgrade::from_request_parts(parts, &()).await?;

    let idle_timeout = settings.idle_timeout;
    let ws = match settings.max_message_size {
        Some(limit) => ws.max_message_size(limit),
        None => ws,
    };
    let response = ws
        .on_failed_upgrade(move |error| {
            let err = UpgradeError::Transport(Box::new(error));
            tracing::warn!(remote = ?remote, error = %err, "upgrade aborted");
        })
        .on_upgrade(move |socket| async move {
            EchoSession::new(socket, remote, idle_timeout).run().await;
        });
    Ok(response)
}
