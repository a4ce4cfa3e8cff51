//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store registered routes (path → handler)
//! - Freeze them into the axum router handed to the serve loop
//! - Return an explicit 404 for unregistered paths
//!
//! # Design Decisions
//! - Written only during startup; consumed by value when serving starts
//! - Exact path match, no prefixes or captures
//! - Registering an existing path replaces the previous handler

use std::collections::HashMap;

use axum::{http::StatusCode, routing::MethodRouter, Router};
use thiserror::Error;

/// Error type for route registration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("route path must start with '/': {0:?}")]
    MissingLeadingSlash(String),

    #[error("route path must be a literal path without captures or wildcards: {0:?}")]
    NotLiteral(String),
}

/// Check that `path` is a literal path the router can match exactly.
pub fn validate_path(path: &str) -> Result<(), RouteError> {
    if !path.starts_with('/') {
        return Err(RouteError::MissingLeadingSlash(path.to_string()));
    }

    let has_capture = path.contains('{') || path.contains('}');
    let has_marker = path
        .split('/')
        .any(|segment| segment.starts_with(':') || segment.starts_with('*'));
    if has_capture || has_marker {
        return Err(RouteError::NotLiteral(path.to_string()));
    }

    Ok(())
}

/// Mapping from URL path to handler.
#[derive(Default)]
pub struct RouteTable {
    routes: HashMap<String, MethodRouter>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `route` at `path`.
    ///
    /// Returns `true` when an earlier registration for the same path was
    /// replaced.
    pub fn insert(&mut self, path: &str, route: MethodRouter) -> Result<bool, RouteError> {
        validate_path(path)?;
        Ok(self.routes.insert(path.to_string(), route).is_some())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.routes.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Registered paths, sorted.
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.routes.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    /// Freeze the table into an axum [`Router`].
    pub fn into_router(self) -> Router {
        self.routes
            .into_iter()
            .fold(Router::new(), |router, (path, route)| router.route(&path, route))
            .fallback(not_found)
    }
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "404 page not found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use axum::routing::any;
    use tower::ServiceExt;

    async fn body_text(router: Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("/").is_ok());
        assert!(validate_path("/create").is_ok());
        assert!(validate_path("/a/b-c_d.e").is_ok());
        assert_eq!(
            validate_path("health"),
            Err(RouteError::MissingLeadingSlash("health".into()))
        );
        for path in ["/users/{id}", "/files/*rest", "/users/:id", "/{*all}"] {
            assert_eq!(validate_path(path), Err(RouteError::NotLiteral(path.into())));
        }
    }

    #[test]
    fn test_insert_reports_replacement() {
        let mut table = RouteTable::new();
        assert!(table.is_empty());
        assert_eq!(table.insert("/x", any(|| async { "a" })), Ok(false));
        assert_eq!(table.insert("/x", any(|| async { "b" })), Ok(true));
        assert_eq!(table.insert("/y", any(|| async { "c" })), Ok(false));
        assert_eq!(table.len(), 2);
        assert!(table.contains("/x"));
        assert_eq!(table.paths(), vec!["/x", "/y"]);
    }

    #[test]
    fn test_insert_rejects_invalid_path() {
        let mut table = RouteTable::new();
        assert!(table.insert("x", any(|| async { "a" })).is_err());
        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn test_last_registration_wins() {
        let mut table = RouteTable::new();
        table.insert("/x", any(|| async { "handler A" })).unwrap();
        table.insert("/x", any(|| async { "handler B" })).unwrap();

        let (status, body) = body_text(table.into_router(), "/x").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "handler B");
    }

    #[tokio::test]
    async fn test_dispatch_is_exact() {
        let mut table = RouteTable::new();
        table.insert("/", any(|| async { "root" })).unwrap();
        table.insert("/health", any(|| async { "up" })).unwrap();
        let router = table.into_router();

        assert_eq!(body_text(router.clone(), "/").await.1, "root");
        assert_eq!(body_text(router.clone(), "/health").await.1, "up");

        let (status, body) = body_text(router.clone(), "/health/deep").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "404 page not found");

        let (status, _) = body_text(router, "/unknown").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
