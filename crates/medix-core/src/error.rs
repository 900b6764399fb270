//! # Error Types
//!
//! Domain-specific error types for medix-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  medix-core errors (this file)                                         │
//! │  ├── CoreError        - Bill and stock rule violations                 │
//! │  └── ValidationError  - Form field failures                            │
//! │                                                                         │
//! │  medix-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  API errors (in apps/api)                                              │
//! │  └── ApiError         - JSON body + HTTP status the pages see          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → toast in the browser   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Stock item id doesn't exist.
    #[error("Stock item not found: {0}")]
    StockItemNotFound(String),

    /// Bill id doesn't exist.
    #[error("Bill not found: {0}")]
    BillNotFound(String),

    /// Not enough units of a batch to bill or adjust.
    ///
    /// ## User Workflow
    /// ```text
    /// Bill line: Paracetamol 500mg (B-1021) x 20
    ///      │
    ///      ▼
    /// Check stock: available=12
    ///      │
    ///      ▼
    /// InsufficientStock { item: "Paracetamol 500mg (B-1021)", available: 12, requested: 20 }
    /// ```
    #[error("Insufficient stock for {item}: available {available}, requested {requested}")]
    InsufficientStock {
        item: String,
        available: i64,
        requested: i64,
    },

    /// Batch is past its expiry date and cannot be billed.
    #[error("{item} expired on {expiry}")]
    ExpiredStock { item: String, expiry: String },

    /// Bill has more line items than allowed.
    #[error("Bill cannot have more than {max} items")]
    BillTooLarge { max: usize },

    /// Line quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Input validation errors.
///
/// Raised before any store is touched; the message is shown next to the
/// offending form field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid email, invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A request carried no fields to change.
    #[error("no fields to update")]
    EmptyUpdate,
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }

    pub(crate) fn too_long(field: &str, max: usize) -> Self {
        ValidationError::TooLong {
            field: field.to_string(),
            max,
        }
    }

    pub(crate) fn invalid(field: &str, reason: &str) -> Self {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            item: "Amoxicillin 250mg (AMX-778)".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Amoxicillin 250mg (AMX-778): available 3, requested 5"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::required("email").to_string(), "email is required");

        let err = ValidationError::TooShort {
            field: "password".to_string(),
            min: 8,
        };
        assert_eq!(err.to_string(), "password must be at least 8 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("name").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
