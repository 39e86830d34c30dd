//! Static file lookup under a fixed root directory.
//!
//! Wraps `tower-http`'s [`ServeDir`]. Only `GET` and `HEAD` are eligible,
//! and a missing file is reported as `None` so the caller can fall through
//! to its own not-found handling.

use std::future::Future;
use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::extract::Request;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use tower::ServiceExt;
use tower_http::services::ServeDir;

/// File-lookup collaborator rooted at one directory.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
    service: ServeDir,
}

impl StaticFiles {
    /// Serves files below `root`; `index.html` answers directory requests.
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            service: ServeDir::new(root),
        }
    }

    /// Root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Looks up the file addressed by `request`.
    ///
    /// Resolves to `None` for methods other than `GET`/`HEAD` and for paths
    /// that resolve to nothing under the root. The returned future owns
    /// copies of the method, URI and headers, so it holds no borrow of
    /// `request`.
    pub fn serve(
        &self,
        request: &Request,
    ) -> impl Future<Output = Option<Response>> + Send + use<> {
        let eligible = request.method() == Method::GET || request.method() == Method::HEAD;

        let mut lookup = Request::new(Body::empty());
        *lookup.method_mut() = request.method().clone();
        *lookup.uri_mut() = request.uri().clone();
        *lookup.headers_mut() = request.headers().clone();
        let service = self.service.clone();

        async move {
            if !eligible {
                return None;
            }
            let path = lookup.uri().path().to_owned();
            let response = match service.oneshot(lookup).await {
                Ok(response) => response,
                Err(never) => match never {},
            };
            if response.status() == StatusCode::NOT_FOUND {
                return None;
            }
            tracing::debug!(%path, status = %response.status(), "static file served");
            Some(response.into_response())
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    fn get(path: &str) -> Request {
        let mut request = Request::new(Body::empty());
        let Ok(uri) = path.parse() else {
            panic!("valid uri");
        };
        *request.uri_mut() = uri;
        request
    }

    #[tokio::test]
    async fn serves_existing_file() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        if std::fs::write(dir.path().join("hello.txt"), "static body").is_err() {
            panic!("write fixture");
        }
        let files = StaticFiles::new(dir.path());

        let Some(response) = files.serve(&get("/hello.txt")).await else {
            panic!("file should be served");
        };
        assert_eq!(response.status(), StatusCode::OK);
        let Ok(bytes) = to_bytes(response.into_body(), usize::MAX).await else {
            panic!("readable body");
        };
        assert_eq!(bytes, "static body");
    }

    #[tokio::test]
    async fn missing_file_is_none() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let files = StaticFiles::new(dir.path());
        assert!(files.serve(&get("/absent.css")).await.is_none());
        assert!(files.serve(&get("/../etc/passwd")).await.is_none());
    }

    #[test]
    fn lookup_future_is_send_and_owned() {
        fn assert_send_static<T: Send + 'static>(_: &T) {}
        let files = StaticFiles::new(Path::new("/nonexistent-static-root"));
        let request = get("/a.txt");
        let lookup = files.serve(&request);
        drop(request);
        assert_send_static(&lookup);
    }

    #[tokio::test]
    async fn non_get_methods_are_skipped() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        if std::fs::write(dir.path().join("a.txt"), "a").is_err() {
            panic!("write fixture");
        }
        let files = StaticFiles::new(dir.path());
        let mut request = get("/a.txt");
        *request.method_mut() = Method::POST;
        assert!(files.serve(&request).await.is_none());
        assert_eq!(files.root(), dir.path());
    }
}
