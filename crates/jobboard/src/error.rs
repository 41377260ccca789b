//! Error types for the data-access layer.

use thiserror::Error;

/// Result type alias for data-access operations
pub type DataResult<T> = Result<T, DataError>;

/// Error types for database operations.
///
/// The HTTP layer classifies these through the `is_*` predicates (or by
/// matching variants) rather than by inspecting message strings:
/// [`DataError::EmptyUpdate`] and [`DataError::Validation`] map to a 400-class
/// response, [`DataError::NotFound`] to 404, and the constraint violations to
/// 400/409 depending on the route.
#[derive(Debug, Error)]
pub enum DataError {
    /// Database connection error
    #[error("connection error: {0}")]
    Connection(String),

    /// Query execution error
    #[error("query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// Row not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Partial update requested with no fields to set
    #[error("empty update: at least one field must be provided")]
    EmptyUpdate,

    /// Unique constraint violation
    #[error("unique constraint violation: {0}")]
    UniqueViolation(String),

    /// Foreign key constraint violation
    #[error("foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Check constraint violation
    #[error("check constraint violation: {0}")]
    CheckViolation(String),

    /// Row decode/mapping error
    #[error("decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Invalid caller-supplied input (filter bounds etc)
    #[error("validation error: {0}")]
    Validation(String),

    /// Pool error
    #[cfg(feature = "pool")]
    #[error("pool error: {0}")]
    Pool(String),

    /// Migration error
    #[cfg(feature = "migrate")]
    #[error("migration error: {0}")]
    Migration(String),
}

impl DataError {
    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this is the empty-update error
    pub fn is_empty_update(&self) -> bool {
        matches!(self, Self::EmptyUpdate)
    }

    /// Check if this is a unique violation error
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation(_))
    }

    /// Parse a tokio_postgres error into a more specific DataError
    pub fn from_db_error(err: tokio_postgres::Error) -> Self {
        if let Some(db_err) = err.as_db_error() {
            let constraint = db_err.constraint().unwrap_or("unknown");
            let message = db_err.message();

            match db_err.code().code() {
                "23505" => return Self::UniqueViolation(format!("{}: {}", constraint, message)),
                "23503" => {
                    return Self::ForeignKeyViolation(format!("{}: {}", constraint, message));
                }
                "23514" => return Self::CheckViolation(format!("{}: {}", constraint, message)),
                _ => {}
            }
        }
        Self::Query(err)
    }
}

#[cfg(feature = "pool")]
impl From<deadpool_postgres::PoolError> for DataError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}

#[cfg(feature = "migrate")]
impl From<refinery::Error> for DataError {
    fn from(err: refinery::Error) -> Self {
        Self::Migration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates_match_variants() {
        assert!(DataError::EmptyUpdate.is_empty_update());
        assert!(!DataError::EmptyUpdate.is_not_found());
        assert!(DataError::not_found("no job with id 7").is_not_found());
        assert!(DataError::UniqueViolation("jobs_title_company_handle_idx".into()).is_unique_violation());
    }
}
