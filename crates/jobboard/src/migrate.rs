//! Embedded schema migrations via [`refinery`].
//!
//! The SQL lives in `migrations/` and is compiled into the binary, so a
//! deployment has no migration files to ship separately.
//!
//! # Example
//!
//! ```ignore
//! use jobboard::{create_pool, migrate};
//!
//! # async fn main_impl() -> jobboard::DataResult<()> {
//! let pool = create_pool(&std::env::var("DATABASE_URL").unwrap())?;
//! migrate::run_pool(&pool).await?;
//! # Ok(()) }
//! ```

use crate::error::DataResult;

pub use refinery::{Report, Runner};

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Runner over the embedded migrations.
pub fn runner() -> Runner {
    embedded::migrations::runner()
}

/// Apply pending migrations on a plain connection.
pub async fn run(client: &mut tokio_postgres::Client) -> DataResult<Report> {
    Ok(runner().run_async(client).await?)
}

/// Apply pending migrations through the pool.
#[cfg(feature = "pool")]
pub async fn run_pool(pool: &deadpool_postgres::Pool) -> DataResult<Report> {
    let mut client = pool.get().await?;
    run(&mut client).await
}
