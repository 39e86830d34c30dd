//! Shared application state passed to every route handler.

use std::path::Path;
use std::sync::Arc;

use crate::api::static_files::StaticFiles;
use crate::config::{ServiceConfig, SessionSettings};
use crate::routing::{Router, RouterError};

/// State handed to every [`crate::routing::Handler`].
///
/// Cloning is cheap: the route table is shared behind an `Arc` and is never
/// mutated after construction.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Route table consulted for every request.
    pub router: Arc<Router>,
    /// Static file collaborator for unmatched `GET`/`HEAD` requests.
    pub static_files: StaticFiles,
    /// Settings applied to upgraded connections.
    pub session: SessionSettings,
}

impl AppState {
    /// Builds state around an already populated router.
    #[must_use]
    pub fn new(router: Router, static_root: &Path, session: SessionSettings) -> Self {
        Self {
            router: Arc::new(router),
            static_files: StaticFiles::new(static_root),
            session,
        }
    }

    /// Builds state with the default routes for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError`] if a default route fails to register.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, RouterError> {
        let router = crate::api::default_router()?;
        Ok(Self::new(router, &config.static_root, config.session))
    }
}
