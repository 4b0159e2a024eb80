//! API error types with HTTP response mapping.

use std::any::Any;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::{Error, ErrorKind};
use thiserror::Error;

use crate::response::ApiResponse;

/// API-level error type that maps to HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A business failure reported by the application layer.
    #[error(transparent)]
    Domain(#[from] Error),

    /// A path segment that should have been an id was not one.
    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    /// The request body could not be read as the expected JSON document.
    #[error(transparent)]
    InvalidBody(#[from] JsonRejection),
}

impl ApiError {
    fn into_error(self) -> Error {
        match self {
            ApiError::Domain(err) => err,
            ApiError::InvalidId(raw) => {
                Error::validation("Request.InvalidId", format!("Invalid ID format: {raw}"))
            }
            ApiError::InvalidBody(rejection) => {
                Error::validation("Request.InvalidBody", rejection.body_text())
            }
        }
    }
}

/// Maps a failure classification to its HTTP status.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Failure => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::None => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = self.into_error();
        let status = status_for(error.kind());

        metrics::counter!("business_failures_total", "code" => error.code().to_string())
            .increment(1);
        tracing::warn!(
            code = error.code(),
            kind = %error.kind(),
            status = status.as_u16(),
            "request failed"
        );

        (status, Json(ApiResponse::failure(&error))).into_response()
    }
}

/// Turns a panic inside a handler into a 500 carrying the failure envelope.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = detail, "handler panicked");

    let error = Error::failure("Server.Unexpected", "An unexpected error occurred");
    metrics::counter!("business_failures_total", "code" => error.code().to_string()).increment(1);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::failure(&error)),
    )
        .into_response()
}
