//! Response helpers shared by the handlers.
//!
//! # Responsibilities
//! - Plain-text error responses
//! - The per-path wrong-method response
//!
//! # Design Decisions
//! - Error bodies are `text/plain; charset=utf-8` with `nosniff`
//! - A wrong method is answered with 404, not 405

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

/// Body sent when a path is requested with the wrong method.
pub const METHOD_NOT_SUPPORTED: &str = "Method is not supported.";

/// Build a plain-text error response.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            ),
            (
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ),
        ],
        message.into(),
    )
        .into_response()
}

pub fn method_not_supported() -> Response {
    error_response(StatusCode::NOT_FOUND, METHOD_NOT_SUPPORTED)
}
