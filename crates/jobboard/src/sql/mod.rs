//! SQL building blocks shared by the models.
//!
//! The central piece is [`build_set_clause`], which turns an ordered set of
//! column assignments ([`UpdateFields`]) plus a field-name translation table
//! ([`ColumnMap`]) into a parameterized `SET` clause. Parameter indices are
//! computed at build time; there is no string replacement.

mod param;
mod update;

pub use param::{Param, ParamList};
pub use update::{ColumnMap, UpdateFields, build_set_clause};
