//! Service error types with HTTP status code mapping.
//!
//! [`ServiceError`] covers failures of ordinary request handlers and renders
//! a structured JSON body. [`UpgradeError`] covers the WebSocket handshake,
//! whose client-facing responses are fixed plain-text bodies.
//! [`SessionError`] ends a single echo session and never reaches HTTP.

use std::time::Duration;

use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Body sent when `/sock` receives a request that is not a handshake.
pub const HANDSHAKE_ERROR_BODY: &str = "Not a websocket handshake";

/// Structured JSON error response body.
///
/// ```json
/// {
///   "error": {
///     "code": 3001,
///     "message": "serialization error: ..."
///   }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
}

/// Handler-level error rendered as a JSON error response.
///
/// # Error Code Ranges
///
/// | Range     | Category | HTTP Status               |
/// |-----------|----------|---------------------------|
/// | 3000–3999 | Server   | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Response payload could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ServiceError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Serialization(_) => 3001,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

/// Failure to turn an HTTP request into a WebSocket connection.
#[derive(Debug, thiserror::Error)]
pub enum UpgradeError {
    /// The request does not carry a valid upgrade handshake.
    #[error("not a websocket handshake: {0}")]
    Handshake(#[source] WebSocketUpgradeRejection),

    /// The handshake was valid but the transport could not be upgraded.
    #[error("websocket upgrade failed: {0}")]
    Transport(#[source] axum::BoxError),
}

impl From<WebSocketUpgradeRejection> for UpgradeError {
    fn from(rejection: WebSocketUpgradeRejection) -> Self {
        match rejection {
            WebSocketUpgradeRejection::ConnectionNotUpgradable(inner) => {
                Self::Transport(Box::new(inner))
            }
            other => Self::Handshake(other),
        }
    }
}

impl IntoResponse for UpgradeError {
    fn into_response(self) -> Response {
        match self {
            Self::Handshake(_) => (StatusCode::BAD_REQUEST, HANDSHAKE_ERROR_BODY).into_response(),
            Self::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

/// Failure that ends one echo session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Reading the next message failed.
    #[error("receive failed: {0}")]
    Receive(#[source] axum::Error),

    /// Writing the reply failed.
    #[error("send failed: {0}")]
    Send(#[source] axum::Error),

    /// No message arrived within the idle timeout.
    #[error("idle for {0:?}")]
    IdleTimeout(Duration),
}
