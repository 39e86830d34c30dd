//! Built-in endpoints: greeting, route introspection and the fallback.

use axum::extract::Request;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use futures_util::FutureExt;

use crate::app_state::AppState;
use crate::error::ServiceError;
use crate::routing::{HandlerFuture, Router};

/// Body of `GET /`.
pub const GREETING: &str = "hello world.";

/// Body of every not-found response.
pub const NOT_FOUND_BODY: &str = "Dude, not found.";

/// `GET /` — Fixed greeting.
pub fn root_handler(_state: AppState, _request: Request) -> HandlerFuture {
    async { (StatusCode::OK, GREETING).into_response() }.boxed()
}

/// `GET /_` — Registered routes as `[[method, pattern, name], ...]`.
pub fn routes_handler(state: AppState, _request: Request) -> HandlerFuture {
    async move {
        render_routes(&state.router)
            .inspect_err(|err| tracing::error!(error = %err, "route listing failed"))
            .into_response()
    }
    .boxed()
}

/// Fallback for requests no route or static file answers.
pub fn not_found_handler(_state: AppState, request: Request) -> HandlerFuture {
    tracing::debug!(method = %request.method(), path = %request.uri().path(), "not found");
    async { (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response() }.boxed()
}

/// Serializes the route table in registration order.
///
/// # Errors
///
/// Returns [`ServiceError::Serialization`] if the listing cannot be encoded.
pub fn render_routes(router: &Router) -> Result<Response, ServiceError> {
    let body = serde_json::to_vec(&router.list())?;
    Ok(([(CONTENT_TYPE, "application/json")], body).into_response())
}
