//! Application error type mapping to HTTP status codes.
//!
//! Plugin routes answer errors with a plain-text body, the way the host's
//! own plugin endpoints do.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Missing or mismatching user identity.
    Unauthorized,
    /// Body could not be decoded or lacks a required field.
    BadRequest,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "not authorized"),
            AppError::BadRequest => (StatusCode::BAD_REQUEST, "invalid request"),
        };
        (status, message).into_response()
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        tracing::debug!(error = %e, "undecodable request body");
        AppError::BadRequest
    }
}
