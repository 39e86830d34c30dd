//! Ordered route table with first-match dispatch.
//!
//! The [`Router`] is built once at startup, then shared read-only (behind an
//! `Arc`) by every request task. Registration takes `&mut self`, so the type
//! system rules out mutation while serving and no locking is needed.

use super::route::{Handler, Route, RouteInfo};
use super::{Method, RouterError};

/// Outcome of [`Router::dispatch`].
#[derive(Debug, Clone, Copy)]
pub enum Dispatch<'a> {
    /// A registered route matched.
    Matched(&'a Route),
    /// Nothing matched; carries the fallback handler.
    NotFound(Handler),
}

impl Dispatch<'_> {
    /// Handler to invoke for this outcome.
    #[must_use]
    pub fn handler(&self) -> Handler {
        match self {
            Self::Matched(route) => route.handler(),
            Self::NotFound(fallback) => *fallback,
        }
    }

    /// Returns `true` when no route matched.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Append-only route table plus the fallback handler.
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<Route>,
    fallback: Handler,
}

impl Router {
    /// Creates an empty router that answers unmatched requests with
    /// `fallback`.
    #[must_use]
    pub fn new(fallback: Handler) -> Self {
        Self {
            routes: Vec::new(),
            fallback,
        }
    }

    /// Appends a route. Duplicates are allowed; the earliest one wins.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::EmptyPattern`] if `pattern` is empty.
    pub fn register(
        &mut self,
        method: Method,
        pattern: impl Into<String>,
        handler: Handler,
        name: Option<&str>,
    ) -> Result<&mut Self, RouterError> {
        let pattern = pattern.into();
        if pattern.is_empty() {
            return Err(RouterError::EmptyPattern);
        }
        let name = name.unwrap_or_default().to_string();
        tracing::debug!(%method, %pattern, %name, "route registered");
        self.routes.push(Route::new(method, pattern, name, handler));
        Ok(self)
    }

    /// Finds the first route matching `method` and `path` exactly.
    #[must_use]
    pub fn dispatch(&self, method: Method, path: &str) -> Dispatch<'_> {
        self.routes
            .iter()
            .find(|route| route.matches(method, path))
            .map_or(Dispatch::NotFound(self.fallback), Dispatch::Matched)
    }

    /// The fallback used for unmatched requests.
    #[must_use]
    pub const fn fallback(&self) -> Handler {
        self.fallback
    }

    /// Lists every route as `(method, pattern, name)` in registration order.
    #[must_use]
    pub fn list(&self) -> Vec<RouteInfo<'_>> {
        self.routes.iter().map(Route::info).collect()
    }

    /// Returns the first route registered under `name`.
    ///
    /// Unnamed routes are never returned, even for an empty `name`.
    #[must_use]
    pub fn route_by_name(&self, name: &str) -> Option<&Route> {
        if name.is_empty() {
            return None;
        }
        self.routes.iter().find(|route| route.name() == name)
    }

    /// Number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
