//! Route descriptors and the handler signature they carry.

use axum::extract::Request;
use axum::response::Response;
use futures_util::future::BoxFuture;
use serde::ser::{Serialize, SerializeTuple, Serializer};

use super::Method;
use crate::app_state::AppState;

/// Future returned by every [`Handler`].
pub type HandlerFuture = BoxFuture<'static, Response>;

/// A request handler: a plain function over the shared state and the
/// incoming request.
///
/// Handlers are stored as function pointers so dispatch is a direct call.
pub type Handler = fn(AppState, Request) -> HandlerFuture;

/// A registered route. Immutable once added to a [`super::Router`].
#[derive(Debug, Clone)]
pub struct Route {
    method: Method,
    pattern: String,
    name: String,
    handler: Handler,
}

impl Route {
    pub(super) fn new(method: Method, pattern: String, name: String, handler: Handler) -> Self {
        Self {
            method,
            pattern,
            name,
            handler,
        }
    }

    /// Method this route answers to.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Literal path pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Route label; empty when none was given.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handler invoked when this route matches.
    #[must_use]
    pub const fn handler(&self) -> Handler {
        self.handler
    }

    /// Returns `true` if the route answers `method` on exactly `path`.
    #[must_use]
    pub fn matches(&self, method: Method, path: &str) -> bool {
        self.method == method && self.pattern == path
    }

    /// Borrows the introspectable part of the route.
    #[must_use]
    pub fn info(&self) -> RouteInfo<'_> {
        RouteInfo {
            method: self.method,
            pattern: &self.pattern,
            name: &self.name,
        }
    }
}

/// `(method, pattern, name)` view of a route.
///
/// Serializes as a three-element array, e.g. `["GET", "/", ""]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteInfo<'a> {
    /// Route method.
    pub method: Method,
    /// Route pattern.
    pub pattern: &'a str,
    /// Route name, possibly empty.
    pub name: &'a str,
}

impl Serialize for RouteInfo<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(3)?;
        tuple.serialize_element(&self.method)?;
        tuple.serialize_element(self.pattern)?;
        tuple.serialize_element(self.name)?;
        tuple.end()
    }
}
