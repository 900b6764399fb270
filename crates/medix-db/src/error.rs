//! # Database Errors
//!
//! ```text
//! sqlx::Error ──► DbError ──► ApiError (apps/api)
//!
//!   RowNotFound                      → NotFound
//!   "UNIQUE constraint failed: t.c"  → UniqueViolation { field: c }
//!   "CHECK constraint failed: ..."   → CheckViolation
//!   PoolTimedOut / PoolClosed / Io   → Unavailable
//!   other database messages          → Query
//!   anything else                    → Internal
//! ```
//!
//! The schema has no foreign keys, so there is no variant for them.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// `value` is "unknown" until a repository fills it in from the input.
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// A row broke a CHECK constraint (e.g. an unknown staff status).
    #[error("Constraint failed: {0}")]
    CheckViolation(String),

    /// The file could not be opened, the pool is closed, or every
    /// connection stayed busy past the acquire timeout.
    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }

    /// True when retrying later might succeed.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, DbError::Unavailable(_))
    }
}

/// Column named by SQLite's "UNIQUE constraint failed: staff.email" message.
fn unique_column(message: &str) -> Option<&str> {
    let target = message.strip_prefix("UNIQUE constraint failed: ")?;
    let first = target.split(',').next()?.trim();
    Some(first.rsplit('.').next().unwrap_or(first))
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Row", "unknown"),
            sqlx::Error::Database(db_err) => {
                let message = db_err.message();
                if let Some(column) = unique_column(message) {
                    DbError::duplicate(column, "unknown")
                } else if message.starts_with("CHECK constraint failed") {
                    DbError::CheckViolation(message.to_string())
                } else {
                    DbError::Query(message.to_string())
                }
            }
            sqlx::Error::PoolTimedOut => DbError::Unavailable("connection pool exhausted".into()),
            sqlx::Error::PoolClosed => DbError::Unavailable("connection pool closed".into()),
            sqlx::Error::Io(e) => DbError::Unavailable(e.to_string()),
            other => DbError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::Migration(err.to_string())
    }
}

pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_column_parsing() {
        assert_eq!(unique_column("UNIQUE constraint failed: staff.email"), Some("email"));
        assert_eq!(
            unique_column("UNIQUE constraint failed: staff.username, staff.email"),
            Some("username")
        );
        assert_eq!(unique_column("NOT NULL constraint failed: staff.name"), None);
    }

    #[test]
    fn test_pool_errors_are_unavailable() {
        assert!(DbError::from(sqlx::Error::PoolTimedOut).is_unavailable());
        assert!(DbError::from(sqlx::Error::PoolClosed).is_unavailable());
        assert!(!DbError::from(sqlx::Error::RowNotFound).is_unavailable());
    }
}
