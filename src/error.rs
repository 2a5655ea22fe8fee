//! Domain error types for the mold lifecycle server.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.

use actix_web::{HttpResponse, ResponseError};
use std::fmt;

/// Application-level errors.
///
/// The four workflow kinds (`NotFound`, `PermissionDenied`, `InvalidState`,
/// `Validation`) are deterministic, synchronous outcomes of an operation and
/// are never retried by the server; the caller decides what to do next.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Resource not found
    #[error("{0} not found")]
    NotFound(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Authentication failed
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Actor is authenticated but not allowed to perform this transition
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Operation attempted from a status that does not permit it,
    /// including lost conditional-update races
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Workflow precondition failure (incomplete items, failing items,
    /// missing photos, missing rejection reason, bad detail payloads)
    #[error("{message}")]
    Validation {
        message: String,
        /// One entry per offending item or field, e.g. "item STR-01 is still pending"
        details: Vec<String>,
    },
}

impl AppError {
    /// Build a validation error from a list of detail strings.
    pub fn validation(message: impl Into<String>, details: Vec<String>) -> Self {
        AppError::Validation {
            message: message.into(),
            details,
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let (status, error_code, response_message, details) = match self {
            AppError::Database(err_str) => {
                tracing::error!("Database error: {}", err_str);
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "An internal database error occurred".to_string(),
                    None,
                )
            }
            AppError::NotFound(_) => (
                actix_web::http::StatusCode::NOT_FOUND,
                "NOT_FOUND",
                self.to_string(),
                None,
            ),
            AppError::InvalidInput(_) => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "INVALID_INPUT",
                self.to_string(),
                None,
            ),
            AppError::Unauthorized(_) => (
                actix_web::http::StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                self.to_string(),
                None,
            ),
            AppError::PermissionDenied(_) => (
                actix_web::http::StatusCode::FORBIDDEN,
                "PERMISSION_DENIED",
                self.to_string(),
                None,
            ),
            AppError::InvalidState(_) => (
                actix_web::http::StatusCode::CONFLICT,
                "INVALID_STATE",
                self.to_string(),
                None,
            ),
            AppError::Validation { message, details } => (
                actix_web::http::StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_FAILED",
                message.clone(),
                Some(details.clone()),
            ),
        };

        HttpResponse::build(status).json(ErrorResponse {
            error: error_code.to_string(),
            message: response_message,
            details,
        })
    }
}

/// Error response body matching OpenAPI schema.
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    /// Present only for validation failures: one entry per offending item/field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

// Conversion implementations for common error types

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::InvalidInput(format!("Invalid UUID: {}", err))
    }
}
