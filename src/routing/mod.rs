//! Request routing: verbs, route descriptors and the first-match router.
//!
//! Routes are matched literally on `(method, path)` in registration order.
//! Unmatched requests resolve to the router's fallback handler; a miss is a
//! normal outcome, never an error.

pub mod method;
pub mod route;
pub mod router;

pub use method::Method;
pub use route::{Handler, HandlerFuture, Route, RouteInfo};
pub use router::{Dispatch, Router};

/// Errors raised while building the route table.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    /// Route patterns must not be empty.
    #[error("route pattern must not be empty")]
    EmptyPattern,

    /// The method is outside the supported verb set.
    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),
}
