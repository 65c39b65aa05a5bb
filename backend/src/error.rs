//! Error handling for the Retail Stock Ledger service
//!
//! Every error maps to a consistent JSON envelope; persistence errors are
//! logged but never leaked verbatim to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Business logic errors
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock {
        requested: Decimal,
        available: Decimal,
    },

    #[error("Conflict: {0}")]
    Conflict(String),

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    /// Serialization failures and deadlocks are worth one more attempt
    /// before they reach the caller.
    pub fn is_retryable_conflict(&self) -> bool {
        match self {
            AppError::DatabaseError(sqlx::Error::Database(db)) => {
                matches!(db.code().as_deref(), Some("40001") | Some("40P01"))
            }
            _ => false,
        }
    }

    /// Once the retry budget is spent, a still-retryable conflict surfaces
    /// as a 409 instead of leaking the database error; anything else passes
    /// through unchanged.
    pub fn surface_conflict(self, operation: &str) -> AppError {
        if self.is_retryable_conflict() {
            AppError::Conflict(format!(
                "{} kept conflicting with concurrent stock activity, please retry",
                operation
            ))
        } else {
            self
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: message.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message: format!("{} not found", resource),
                    field: None,
                },
            ),
            AppError::InsufficientStock {
                requested,
                available,
            } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "INSUFFICIENT_STOCK".to_string(),
                    message: format!(
                        "Requested {} exceeds available balance of {}",
                        requested, available
                    ),
                    field: None,
                },
            ),
            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ErrorDetail {
                    code: "CONFLICT".to_string(),
                    message: msg.clone(),
                    field: None,
                },
            ),
            AppError::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "DATABASE_ERROR".to_string(),
                    message: "A database error occurred".to_string(),
                    field: None,
                },
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message: msg.clone(),
                    field: None,
                },
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred".to_string(),
                    field: None,
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::borrow::Cow;
    use std::fmt;

    /// Minimal database error carrying just a SQLSTATE code
    #[derive(Debug)]
    struct StubDbError(&'static str);

    impl fmt::Display for StubDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "sqlstate {}", self.0)
        }
    }

    impl std::error::Error for StubDbError {}

    impl DatabaseError for StubDbError {
        fn message(&self) -> &str {
            "simulated database failure"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.0))
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    fn db_error(code: &'static str) -> AppError {
        AppError::DatabaseError(sqlx::Error::Database(Box::new(StubDbError(code))))
    }

    #[test]
    fn serialization_and_deadlock_failures_are_retryable() {
        assert!(db_error("40001").is_retryable_conflict());
        assert!(db_error("40P01").is_retryable_conflict());
        assert!(!db_error("23505").is_retryable_conflict());
    }

    #[test]
    fn exhausted_conflict_surfaces_as_conflict() {
        let err = db_error("40001").surface_conflict("stock_out");
        assert!(matches!(err, AppError::Conflict(_)));

        let err = db_error("40P01").surface_conflict("stock_take");
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn non_conflict_errors_pass_through_unchanged() {
        let err = AppError::NotFound("Product".to_string()).surface_conflict("stock_out");
        assert!(matches!(err, AppError::NotFound(_)));

        let err = db_error("23505").surface_conflict("stock_take");
        assert!(matches!(err, AppError::DatabaseError(_)));
    }
}
