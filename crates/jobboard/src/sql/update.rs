//! Partial-update `SET` clause builder.
//!
//! A partial update arrives as an arbitrary subset of a resource's fields.
//! [`UpdateFields`] collects the requested assignments as an **ordered** list
//! of `(field, value)` pairs, so the pairing between clause fragments and
//! bind values is explicit rather than an artifact of map iteration order.
//! [`build_set_clause`] renders them as `"column"=$n` fragments with
//! contiguous 1-based placeholders.
//!
//! ```ignore
//! let fields = UpdateFields::new()
//!     .set("firstName", "Aliya")
//!     .set("age", 32i32);
//! let columns = ColumnMap::new().rename("firstName", "first_name");
//!
//! let (clause, mut params) = build_set_clause(fields, &columns)?;
//! assert_eq!(clause, r#""first_name"=$1, "age"=$2"#);
//!
//! // The caller continues the placeholder sequence for its WHERE clause.
//! let id_idx = params.push(7i64);
//! let sql = format!("UPDATE users SET {clause} WHERE id = ${id_idx}");
//! ```

use crate::error::{DataError, DataResult};
use crate::sql::param::{Param, ParamList};
use tokio_postgres::types::ToSql;

/// Ordered set of column assignments for a partial UPDATE.
///
/// Insertion order is preserved and determines placeholder numbering. Field
/// names are the application-level (wire) names; storage column names are
/// resolved later through a [`ColumnMap`].
#[derive(Clone, Debug, Default)]
pub struct UpdateFields {
    entries: Vec<(String, Param)>,
}

impl UpdateFields {
    /// Create an empty assignment set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a value to a field.
    pub fn set<T: ToSql + Send + Sync + 'static>(mut self, field: &str, value: T) -> Self {
        self.entries.push((field.to_string(), Param::new(value)));
        self
    }

    /// Assign a value if present (`None` => field is not part of the update).
    pub fn set_opt<T: ToSql + Send + Sync + 'static>(self, field: &str, value: Option<T>) -> Self {
        if let Some(v) = value {
            self.set(field, v)
        } else {
            self
        }
    }

    /// Assign a tri-state patch value to a nullable column.
    ///
    /// - `None`: field is not part of the update
    /// - `Some(None)`: field is set to SQL `NULL`
    /// - `Some(Some(v))`: field is set to `v`
    pub fn set_nullable<T: ToSql + Send + Sync + 'static>(
        self,
        field: &str,
        value: Option<Option<T>>,
    ) -> Self {
        if let Some(v) = value {
            self.set(field, v)
        } else {
            self
        }
    }

    /// Number of assignments.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no assignments were made.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Field names in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(field, _)| field.as_str())
    }
}

/// Translation table from application field names to storage column names.
///
/// Entries are optional per field; a field with no entry is used verbatim as
/// the column name. The table is built from programmer-controlled constants,
/// so resolved names are quoted but not escaped.
#[derive(Clone, Debug, Default)]
pub struct ColumnMap {
    entries: Vec<(&'static str, &'static str)>,
}

impl ColumnMap {
    /// Create an empty translation table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map an application field name to a storage column name.
    pub fn rename(mut self, field: &'static str, column: &'static str) -> Self {
        self.entries.push((field, column));
        self
    }

    /// Resolve a field name to its storage column name.
    pub fn column<'a>(&'a self, field: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(from, _)| *from == field)
            .map(|(_, to)| *to)
            .unwrap_or(field)
    }
}

/// Build a parameterized `SET` clause from an ordered assignment set.
///
/// Returns the `, `-joined sequence of `"column"=$n` fragments together with
/// the bind values in matching order; placeholder numbering is contiguous
/// starting at `$1`. The caller embeds the clause into a full
/// `UPDATE … SET {clause} WHERE …` statement and may keep pushing onto the
/// returned [`ParamList`] to number any further placeholders.
///
/// Fails with [`DataError::EmptyUpdate`] when `fields` is empty; nothing is
/// built in that case.
pub fn build_set_clause(
    fields: UpdateFields,
    columns: &ColumnMap,
) -> DataResult<(String, ParamList)> {
    if fields.is_empty() {
        return Err(DataError::EmptyUpdate);
    }

    let mut params = ParamList::new();
    let mut fragments = Vec::with_capacity(fields.len());
    for (field, value) in fields.entries {
        let idx = params.push_param(value);
        fragments.push(format!("\"{}\"=${}", columns.column(&field), idx));
    }

    Ok((fragments.join(", "), params))
}
