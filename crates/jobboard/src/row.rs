//! Row mapping traits and utilities

use crate::error::DataResult;
use tokio_postgres::Row;

/// Trait for converting a database row into a Rust struct.
///
/// Implementations read columns by name through [`RowExt::try_get_column`] so
/// that decode failures carry the offending column.
///
/// # Example
///
/// ```ignore
/// use jobboard::{DataResult, FromRow, RowExt};
///
/// struct Company {
///     handle: String,
///     name: String,
/// }
///
/// impl FromRow for Company {
///     fn from_row(row: &tokio_postgres::Row) -> DataResult<Self> {
///         Ok(Self {
///             handle: row.try_get_column("handle")?,
///             name: row.try_get_column("name")?,
///         })
///     }
/// }
/// ```
pub trait FromRow: Sized {
    /// Convert a database row into Self
    fn from_row(row: &Row) -> DataResult<Self>;
}

/// Extension trait for Row to provide typed access
pub trait RowExt {
    /// Try to get a column value, returning DataError::Decode on failure
    fn try_get_column<T>(&self, column: &str) -> DataResult<T>
    where
        T: for<'a> tokio_postgres::types::FromSql<'a>;
}

impl RowExt for Row {
    fn try_get_column<T>(&self, column: &str) -> DataResult<T>
    where
        T: for<'a> tokio_postgres::types::FromSql<'a>,
    {
        self.try_get(column)
            .map_err(|e| crate::error::DataError::decode(column, e.to_string()))
    }
}
