//! Error types for the SEO audit service.
//!
//! This module provides structured error handling with:
//! - `AppError`: Domain-specific errors for audit and lead operations
//! - `ApiError`: Wrapper for HTTP handler errors (renders a JSON body)
//! - `Result<T>`: Type alias for Results using AppError

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;
use thiserror::Error;

// ============================================================================
// DOMAIN ERROR TYPE
// ============================================================================

/// Domain-specific errors for application operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid or malformed URL
    #[error("{0}")]
    InvalidUrl(String),

    /// Caller-supplied input failed validation
    #[error("{0}")]
    Validation(String),

    /// Network request failed
    #[error("Network error: {0}")]
    NetworkError(String),

    /// External service error (PageSpeed, SERP, webhook)
    #[error("Service error ({service}): {message}")]
    ServiceError { service: &'static str, message: String },

    /// Scoring primitive called with unusable factors
    #[error("Invalid score input: {0}")]
    InvalidScoreInput(String),

    /// Generic error with context
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether the error was caused by bad caller input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidUrl(_) | Self::Validation(_))
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;

// ============================================================================
// API ERROR (FOR AXUM)
// ============================================================================

/// Wrapper for errors returned from HTTP handlers.
///
/// Client errors carry their own message. Everything else is logged in full and
/// replaced with `public_message` so internal detail never reaches the browser.
#[derive(Debug)]
pub struct ApiError {
    pub error: AppError,
    pub public_message: &'static str,
}

impl ApiError {
    pub fn new(error: impl Into<AppError>, public_message: &'static str) -> Self {
        Self { error: error.into(), public_message }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            error: AppError::validation(msg),
            public_message: "Bad request",
        }
    }

    pub fn status(&self) -> StatusCode {
        if self.error.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl std::error::Error for ApiError {}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::BAD_REQUEST {
            self.error.to_string()
        } else {
            tracing::error!("{:#}", self.error);
            self.public_message.to_string()
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_bad_request() {
        let err = ApiError::bad_request("Invalid email format");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Invalid email format");
    }

    #[test]
    fn internal_errors_map_to_server_error() {
        let err = ApiError::new(anyhow::anyhow!("boom"), "Something went wrong");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = ApiError::new(AppError::InvalidScoreInput("empty".into()), "Something went wrong");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_url_is_a_client_error() {
        assert!(AppError::InvalidUrl("Invalid URL format".into()).is_client_error());
        assert!(!AppError::NetworkError("timeout".into()).is_client_error());
        assert!(!AppError::ServiceError { service: "serp", message: "502".into() }.is_client_error());
    }
}
