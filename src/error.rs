//! Error types and error handling for the application
//!
//! This module defines custom error types that can be converted to HTTP responses.
//! All errors implement `IntoResponse` to provide consistent error formatting.

use crate::domain::{FieldErrors, HireValidationError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Client-facing message for failed contact submissions
pub const CONTACT_FAILURE_MESSAGE: &str = "Failed to process request";

/// Client-facing message for every other server-side failure
pub const INTERNAL_FAILURE_MESSAGE: &str = "Internal server error";

/// Client-facing message for a repeated hire request
pub const DUPLICATE_REQUEST_MESSAGE: &str =
    "A request for this service has already been submitted with this email";

/// Application-level error types
///
/// Each variant implements automatic conversion to HTTP responses via `IntoResponse`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Contact form failed field validation
    #[error("Invalid contact submission: {0}")]
    InvalidContact(FieldErrors),

    /// Request body could not be parsed as the expected JSON
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// Hire request failed a validation rule
    #[error("Invalid hire request: {0}")]
    InvalidHireRequest(#[from] HireValidationError),

    /// Same email already requested the same service
    #[error("Duplicate hire request")]
    DuplicateRequest,

    /// Contact submission failed after validation
    #[error("Contact form error: {0:#}")]
    ContactFailed(anyhow::Error),

    /// Hire request failed after validation
    #[error("Hire request error: {0:#}")]
    HireRequestFailed(anyhow::Error),

    /// Internal server error (catch-all for unexpected errors)
    #[error("Internal server error: {0:#}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InvalidContact(errors) => {
                (StatusCode::BAD_REQUEST, Json(errors)).into_response()
            }
            AppError::MalformedBody(detail) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "detail": detail }))).into_response()
            }
            AppError::InvalidHireRequest(rule) => {
                status_message(StatusCode::BAD_REQUEST, &rule.to_string())
            }
            AppError::DuplicateRequest => {
                status_message(StatusCode::CONFLICT, DUPLICATE_REQUEST_MESSAGE)
            }
            AppError::ContactFailed(_) => {
                tracing::error!(error = ?self, "{}", self);
                status_message(StatusCode::INTERNAL_SERVER_ERROR, CONTACT_FAILURE_MESSAGE)
            }
            AppError::HireRequestFailed(_) | AppError::Internal(_) => {
                tracing::error!(error = ?self, "{}", self);
                status_message(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_FAILURE_MESSAGE)
            }
        }
    }
}

fn status_message(status: StatusCode, message: &str) -> Response {
    let body = Json(json!({
        "status": "error",
        "message": message,
    }));

    (status, body).into_response()
}
