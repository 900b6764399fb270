//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Handler -> Result<Json<T>, ApiError>                                  │
//! │       │                                                                 │
//! │       ├── ValidationError ─────────────┐                               │
//! │       ├── CoreError (stock, bills) ────┼──► ApiError { code, message } │
//! │       └── DbError (staff, profile) ────┘         │                     │
//! │                                                   ▼                     │
//! │                                   HTTP status + JSON body              │
//! │                                                                         │
//! │  fetch('/api/staff', …)                                                │
//! │    → 409 { "code": "CONFLICT", "message": "username 'asha' …" }        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Internal failures are logged here and reach the client only as a generic
//! message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use medix_core::{CoreError, ValidationError};
use medix_db::DbError;
use serde::Serialize;

/// Error body returned by every failing route.
///
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Staff member not found: 7d1c…"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Unique value already taken (409)
    Conflict,

    /// Not enough units on the shelf (409)
    InsufficientStock,

    /// Database operation failed (500)
    DatabaseError,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::Conflict | ErrorCode::InsufficientStock => StatusCode::CONFLICT,
            ErrorCode::DatabaseError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => ApiError::new(
                ErrorCode::Conflict,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::CheckViolation(e) => {
                tracing::warn!("Constraint check failed: {}", e);
                ApiError::validation("Value not allowed")
            }
            DbError::Unavailable(e) => {
                tracing::error!("Database unavailable: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database unavailable, try again")
            }
            DbError::Migration(e) => {
                tracing::error!("Migration failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::Query(e) => {
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::Internal, "Internal server error")
            }
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::StockItemNotFound(id) => ApiError::not_found("Stock item", &id),
            CoreError::BillNotFound(id) => ApiError::not_found("Bill", &id),
            e @ CoreError::InsufficientStock { .. } => {
                ApiError::new(ErrorCode::InsufficientStock, e.to_string())
            }
            e @ (CoreError::ExpiredStock { .. }
            | CoreError::BillTooLarge { .. }
            | CoreError::QuantityTooLarge { .. }) => ApiError::validation(e.to_string()),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_serializes_screaming_snake() {
        let err = ApiError::new(ErrorCode::InsufficientStock, "x");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "INSUFFICIENT_STOCK");
        assert_eq!(json["message"], "x");
    }

    #[test]
    fn test_db_error_mapping() {
        let err: ApiError = DbError::duplicate("email", "a@b.in").into();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.code.status(), StatusCode::CONFLICT);
        assert!(err.message.contains("a@b.in"));

        let err: ApiError = DbError::Query("no such column: secret".into()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("secret"));
    }

    #[test]
    fn test_core_error_mapping() {
        let err: ApiError = CoreError::InsufficientStock {
            item: "Amoxicillin 250mg (AMX-7)".into(),
            available: 2,
            requested: 5,
        }
        .into();
        assert_eq!(err.code, ErrorCode::InsufficientStock);

        let err: ApiError = CoreError::BillNotFound("b-1".into()).into();
        assert_eq!(err.code.status(), StatusCode::NOT_FOUND);

        let err: ApiError = CoreError::Validation(ValidationError::EmptyUpdate).into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "no fields to update");
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::not_found("Bill", "b-9").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
