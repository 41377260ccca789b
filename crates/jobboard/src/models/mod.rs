//! Data-access models for the job board.
//!
//! Each model owns its table's SQL: straight-line SELECT/INSERT/DELETE plus a
//! partial UPDATE assembled through [`crate::sql::build_set_clause`]. All
//! methods take the database handle explicitly as any
//! [`crate::GenericClient`], so they compose inside transactions.

pub mod company;
pub mod job;

pub use company::{Company, CompanyDetail, CompanyFilter, CompanyPatch, NewCompany};
pub use job::{Job, JobFilter, JobPatch, NewJob};

/// Deserialize a tri-state patch field.
///
/// With `#[serde(default, deserialize_with = "explicit_null")]` on an
/// `Option<Option<T>>` field: a missing key stays `None`, an explicit JSON
/// `null` becomes `Some(None)` (set the column to NULL), and a value becomes
/// `Some(Some(v))`.
pub(crate) fn explicit_null<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}
