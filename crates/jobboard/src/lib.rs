//! # jobboard
//!
//! PostgreSQL data-access layer for a job and company listings backend.
//!
//! ## Features
//!
//! - **Partial updates as data**: [`UpdateFields`] collects an ordered set of
//!   column assignments; [`build_set_clause`] renders them as a parameterized
//!   `SET` clause with contiguous `$n` placeholders, translating wire-level
//!   field names to column names through a [`ColumnMap`]
//! - **Explicit clients**: every model method takes the database handle as a
//!   [`GenericClient`], so the same code runs on a plain connection, a pooled
//!   connection, or inside a transaction
//! - **Typed errors**: "no rows" is [`DataError::NotFound`], an empty patch
//!   is [`DataError::EmptyUpdate`], and constraint violations keep their
//!   SQLSTATE class, so the HTTP layer never inspects message strings
//! - **SQL visibility**: wrap any client in [`TracedClient`] to log each
//!   statement with its timing
//!
//! ## Example
//!
//! ```ignore
//! use jobboard::models::{Job, JobFilter, JobPatch};
//! use jobboard::{create_pool, migrate};
//!
//! # async fn main_impl() -> jobboard::DataResult<()> {
//! let pool = create_pool(&std::env::var("DATABASE_URL").unwrap())?;
//! migrate::run_pool(&pool).await?;
//!
//! let client = pool.get().await?;
//! let engineering = Job::find_all(
//!     &client,
//!     &JobFilter { title: Some("engineer".into()), ..JobFilter::default() },
//! )
//! .await?;
//!
//! let patch: JobPatch = serde_json::from_str(r#"{"salary": 180000}"#).unwrap();
//! let updated = Job::update(&client, engineering[0].id, patch).await?;
//! # Ok(()) }
//! ```

pub mod client;
pub mod error;
pub mod models;
pub mod row;
pub mod sql;

pub use client::GenericClient;
pub use error::{DataError, DataResult};
pub use row::{FromRow, RowExt};
pub use sql::{ColumnMap, Param, ParamList, UpdateFields, build_set_clause};

pub use models::{
    Company, CompanyDetail, CompanyFilter, CompanyPatch, Job, JobFilter, JobPatch, NewCompany,
    NewJob,
};

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use pool::{create_pool, create_pool_with_config, create_pool_with_manager_config};

#[cfg(feature = "trace")]
pub mod trace;

#[cfg(feature = "trace")]
pub use trace::TracedClient;

#[cfg(feature = "migrate")]
pub mod migrate;
