//! SQL tracing via `tracing`.
//!
//! [`TracedClient`] wraps any [`GenericClient`] and emits every executed
//! statement with its timing under the `jobboard.sql` target: debug on
//! success, warn on failure. Enable via the crate feature:
//! `jobboard = { features = ["trace"] }` (on by default).

use crate::client::GenericClient;
use crate::error::{DataError, DataResult};
use std::time::Instant;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// Truncate long SQL strings for log output (in chars).
const MAX_SQL_LENGTH: usize = 200;

/// A client wrapper that logs each statement it executes.
pub struct TracedClient<C> {
    inner: C,
}

impl<C: GenericClient> TracedClient<C> {
    /// Wrap a client. `C` may be a reference, so a borrowed client can be
    /// traced without giving up ownership.
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    /// Unwrap the inner client.
    pub fn into_inner(self) -> C {
        self.inner
    }
}

fn truncate_sql(sql: &str) -> &str {
    match sql.char_indices().nth(MAX_SQL_LENGTH) {
        Some((idx, _)) => &sql[..idx],
        None => sql,
    }
}

fn emit(kind: &str, sql: &str, param_count: usize, started: Instant, err: Option<&DataError>) {
    let elapsed_ms = started.elapsed().as_millis() as u64;
    let sql = truncate_sql(sql);
    match err {
        None => tracing::debug!(
            target: "jobboard.sql",
            kind,
            param_count,
            elapsed_ms,
            sql = %sql,
            "sql executed"
        ),
        Some(error) => tracing::warn!(
            target: "jobboard.sql",
            kind,
            param_count,
            elapsed_ms,
            sql = %sql,
            error = %error,
            "sql failed"
        ),
    }
}

// query_opt/query_one funnel through query, so every statement is logged
// exactly once.
impl<C: GenericClient> GenericClient for TracedClient<C> {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> DataResult<Vec<Row>> {
        let started = Instant::now();
        let result = self.inner.query(sql, params).await;
        emit("query", sql, params.len(), started, result.as_ref().err());
        result
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> DataResult<u64> {
        let started = Instant::now();
        let result = self.inner.execute(sql, params).await;
        emit("execute", sql, params.len(), started, result.as_ref().err());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_is_char_safe() {
        let short = "SELECT 1";
        assert_eq!(truncate_sql(short), short);

        let long = "x".repeat(MAX_SQL_LENGTH + 50);
        assert_eq!(truncate_sql(&long).len(), MAX_SQL_LENGTH);

        // Multi-byte characters must not be split.
        let wide = "é".repeat(MAX_SQL_LENGTH + 1);
        assert_eq!(truncate_sql(&wide).chars().count(), MAX_SQL_LENGTH);
    }
}
