//! HTTP surface: default routes, request dispatch and app composition.
//!
//! Every request enters through [`dispatch`], which consults the
//! [`Router`] first, then the static file collaborator for unmatched
//! `GET`/`HEAD` requests, and finally the router's fallback.

pub mod handlers;
pub mod static_files;

use std::net::SocketAddr;

use axum::extract::{Request, State};
use axum::response::Response;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::routing::{Method, Router, RouterError};
use crate::ws::handler::sock_handler;

/// Builds the route table served by default:
///
/// | Method | Pattern | Handler |
/// |--------|---------|---------|
/// | GET    | `/`     | greeting |
/// | GET    | `/_`    | route introspection |
/// | GET    | `/sock` | WebSocket echo |
///
/// # Errors
///
/// Returns [`RouterError`] if a route fails to register.
pub fn default_router() -> Result<Router, RouterError> {
    let mut router = Router::new(handlers::not_found_handler);
    router
        .register(Method::Get, "/", handlers::root_handler, None)?
        .register(Method::Get, "/_", handlers::routes_handler, None)?
        .register(Method::Get, "/sock", sock_handler, None)?;
    Ok(router)
}

/// Routes one request through the route table.
pub async fn dispatch(State(state): State<AppState>, request: Request) -> Response {
    let Ok(method) = Method::try_from(request.method()) else {
        let fallback = state.router.fallback();
        return fallback(state, request).await;
    };

    let outcome = state.router.dispatch(method, request.uri().path());
    let handler = outcome.handler();
    if outcome.is_not_found() {
        let lookup = state.static_files.serve(&request);
        if let Some(response) = lookup.await {
            return response;
        }
    }
    handler(state, request).await
}

/// Composes the axum application: every request goes to [`dispatch`].
pub fn build_app(state: AppState) -> axum::Router {
    axum::Router::new()
        .fallback(dispatch)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the application on `listener` until `shutdown` resolves.
///
/// Handlers see the peer address through `ConnectInfo<SocketAddr>`.
///
/// # Errors
///
/// Returns the I/O error that stopped the server.
pub async fn serve<F>(
    listener: tokio::net::TcpListener,
    state: AppState,
    shutdown: F,
) -> std::io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let app = build_app(state).into_make_service_with_connect_info::<SocketAddr>();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}
