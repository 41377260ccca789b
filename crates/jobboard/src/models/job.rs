//! Job postings: create, filtered listing, get, partial update, remove.

use crate::client::GenericClient;
use crate::error::{DataError, DataResult};
use crate::row::{FromRow, RowExt};
use crate::sql::{ColumnMap, ParamList, UpdateFields, build_set_clause};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

const JOB_COLUMNS: &str = "id, title, salary, equity, company_handle, created_at";

/// A job posting.
///
/// `equity` is a NUMERIC fraction in `[0, 1]`; `Decimal` serializes as a
/// string on the wire, which keeps the fraction exact.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
    pub created_at: DateTime<Utc>,
}

impl FromRow for Job {
    fn from_row(row: &Row) -> DataResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            salary: row.try_get_column("salary")?,
            equity: row.try_get_column("equity")?,
            company_handle: row.try_get_column("company_handle")?,
            created_at: row.try_get_column("created_at")?,
        })
    }
}

/// Input for [`Job::create`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub salary: Option<i32>,
    #[serde(default)]
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// Partial update for a job.
///
/// `salary` and `equity` are tri-state: a missing key leaves the column
/// alone, an explicit `null` clears it. `id` and `companyHandle` are not
/// updatable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "super::explicit_null")]
    pub salary: Option<Option<i32>>,
    #[serde(default, deserialize_with = "super::explicit_null")]
    pub equity: Option<Option<Decimal>>,
}

impl JobPatch {
    /// Collect the requested assignments, in declaration order.
    ///
    /// Job wire names already match their column names, so the jobs
    /// translation table is empty.
    pub fn into_update_fields(self) -> UpdateFields {
        UpdateFields::new()
            .set_opt("title", self.title)
            .set_nullable("salary", self.salary)
            .set_nullable("equity", self.equity)
    }
}

/// Optional filters for [`Job::find_all`]. Absent filters match everything.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFilter {
    /// Case-insensitive title substring.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub min_salary: Option<i32>,
    /// `Some(true)` restricts to jobs with a non-zero equity share;
    /// `Some(false)` and `None` do not filter.
    #[serde(default)]
    pub has_equity: Option<bool>,
    #[serde(default)]
    pub company_handle: Option<String>,
}

impl JobFilter {
    fn build_query(&self) -> (String, ParamList) {
        let mut params = ParamList::new();
        let mut conditions = Vec::new();

        if let Some(title) = &self.title {
            let idx = params.push(format!("%{title}%"));
            conditions.push(format!("title ILIKE ${idx}"));
        }
        if let Some(min_salary) = self.min_salary {
            let idx = params.push(min_salary);
            conditions.push(format!("salary >= ${idx}"));
        }
        if self.has_equity == Some(true) {
            conditions.push("equity > 0".to_string());
        }
        if let Some(handle) = &self.company_handle {
            let idx = params.push(handle.clone());
            conditions.push(format!("company_handle = ${idx}"));
        }

        let mut sql = format!("SELECT {JOB_COLUMNS} FROM jobs");
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY title");
        (sql, params)
    }
}

fn update_statement(id: i64, patch: JobPatch) -> DataResult<(String, ParamList)> {
    let (set_clause, mut params) = build_set_clause(patch.into_update_fields(), &ColumnMap::new())?;
    let id_idx = params.push(id);
    let sql = format!("UPDATE jobs SET {set_clause} WHERE id = ${id_idx} RETURNING {JOB_COLUMNS}");
    Ok((sql, params))
}

impl Job {
    /// Insert a new posting and return it.
    ///
    /// A duplicate `(title, company_handle)` pair surfaces as
    /// [`DataError::UniqueViolation`]; an unknown company handle as
    /// [`DataError::ForeignKeyViolation`].
    pub async fn create(client: &impl GenericClient, input: NewJob) -> DataResult<Job> {
        let sql = format!(
            "INSERT INTO jobs (title, salary, equity, company_handle) \
             VALUES ($1, $2, $3, $4) RETURNING {JOB_COLUMNS}"
        );
        let row = client
            .query_one(
                &sql,
                &[&input.title, &input.salary, &input.equity, &input.company_handle],
            )
            .await?;
        Job::from_row(&row)
    }

    /// List postings matching the filter, ordered by title.
    pub async fn find_all(client: &impl GenericClient, filter: &JobFilter) -> DataResult<Vec<Job>> {
        let (sql, params) = filter.build_query();
        let params_ref = params.as_refs();
        let rows = client.query(&sql, &params_ref).await?;
        rows.iter().map(Job::from_row).collect()
    }

    /// Fetch a posting by id.
    pub async fn get(client: &impl GenericClient, id: i64) -> DataResult<Job> {
        let sql = format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1");
        let row = client
            .query_opt(&sql, &[&id])
            .await?
            .ok_or_else(|| DataError::not_found(format!("no job with id {id}")))?;
        Job::from_row(&row)
    }

    /// Apply a partial update and return the updated posting.
    ///
    /// Fails with [`DataError::EmptyUpdate`] before any SQL executes when the
    /// patch contains no fields, and with [`DataError::NotFound`] when the id
    /// does not exist.
    pub async fn update(client: &impl GenericClient, id: i64, patch: JobPatch) -> DataResult<Job> {
        let (sql, params) = update_statement(id, patch)?;
        let params_ref = params.as_refs();
        let row = client
            .query_opt(&sql, &params_ref)
            .await?
            .ok_or_else(|| DataError::not_found(format!("no job with id {id}")))?;
        Job::from_row(&row)
    }

    /// Delete a posting by id.
    pub async fn remove(client: &impl GenericClient, id: i64) -> DataResult<()> {
        let deleted = client
            .execute("DELETE FROM jobs WHERE id = $1", &[&id])
            .await?;
        if deleted == 0 {
            return Err(DataError::not_found(format!("no job with id {id}")));
        }
        Ok(())
    }
}
