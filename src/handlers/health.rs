//! Health check handler.
//!
//! Liveness only: the process answering is the whole check.

use axum::{
    http::{header, Method},
    response::{IntoResponse, Response},
};

use crate::http::response::method_not_supported;

/// Body returned by a healthy instance.
pub const HEALTH_BODY: &str = r#"{"status": "UP"}"#;

/// Handler for GET /health
///
/// ## Example Response
///
/// ```json
/// {"status": "UP"}
/// ```
#[tracing::instrument(skip_all, name = "certinator.health.check")]
pub async fn health_check(method: Method) -> Response {
    if method != Method::GET {
        return method_not_supported();
    }

    (
        [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
        HEALTH_BODY,
    )
        .into_response()
}
