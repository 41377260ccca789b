//! Companies: create, filtered listing, get (with postings), partial update,
//! remove.

use crate::client::GenericClient;
use crate::error::{DataError, DataResult};
use crate::models::job::{Job, JobFilter};
use crate::row::{FromRow, RowExt};
use crate::sql::{ColumnMap, ParamList, UpdateFields, build_set_clause};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

const COMPANY_COLUMNS: &str = "handle, name, description, num_employees, logo_url, created_at";

/// Wire names differ from column names for two company fields.
fn company_columns() -> ColumnMap {
    ColumnMap::new()
        .rename("numEmployees", "num_employees")
        .rename("logoUrl", "logo_url")
}

/// A company that can post jobs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl FromRow for Company {
    fn from_row(row: &Row) -> DataResult<Self> {
        Ok(Self {
            handle: row.try_get_column("handle")?,
            name: row.try_get_column("name")?,
            description: row.try_get_column("description")?,
            num_employees: row.try_get_column("num_employees")?,
            logo_url: row.try_get_column("logo_url")?,
            created_at: row.try_get_column("created_at")?,
        })
    }
}

/// A company together with its job postings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<Job>,
}

/// Input for [`Company::create`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub num_employees: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// Partial update for a company. The `handle` is not updatable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "super::explicit_null")]
    pub num_employees: Option<Option<i32>>,
    #[serde(default, deserialize_with = "super::explicit_null")]
    pub logo_url: Option<Option<String>>,
}

impl CompanyPatch {
    /// Collect the requested assignments under their wire names; the
    /// translation to column names happens in [`build_set_clause`].
    pub fn into_update_fields(self) -> UpdateFields {
        UpdateFields::new()
            .set_opt("name", self.name)
            .set_opt("description", self.description)
            .set_nullable("numEmployees", self.num_employees)
            .set_nullable("logoUrl", self.logo_url)
    }
}

/// Optional filters for [`Company::find_all`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyFilter {
    /// Case-insensitive name substring.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub min_employees: Option<i32>,
    #[serde(default)]
    pub max_employees: Option<i32>,
}

impl CompanyFilter {
    fn build_query(&self) -> DataResult<(String, ParamList)> {
        if let (Some(min), Some(max)) = (self.min_employees, self.max_employees) {
            if min > max {
                return Err(DataError::validation(
                    "minEmployees cannot be greater than maxEmployees",
                ));
            }
        }

        let mut params = ParamList::new();
        let mut conditions = Vec::new();

        if let Some(name) = &self.name {
            let idx = params.push(format!("%{name}%"));
            conditions.push(format!("name ILIKE ${idx}"));
        }
        if let Some(min) = self.min_employees {
            let idx = params.push(min);
            conditions.push(format!("num_employees >= ${idx}"));
        }
        if let Some(max) = self.max_employees {
            let idx = params.push(max);
            conditions.push(format!("num_employees <= ${idx}"));
        }

        let mut sql = format!("SELECT {COMPANY_COLUMNS} FROM companies");
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY name");
        Ok((sql, params))
    }
}

fn update_statement(handle: &str, patch: CompanyPatch) -> DataResult<(String, ParamList)> {
    let (set_clause, mut params) =
        build_set_clause(patch.into_update_fields(), &company_columns())?;
    let handle_idx = params.push(handle.to_string());
    let sql = format!(
        "UPDATE companies SET {set_clause} WHERE handle = ${handle_idx} RETURNING {COMPANY_COLUMNS}"
    );
    Ok((sql, params))
}

impl Company {
    /// Insert a new company and return it.
    ///
    /// A duplicate handle or name surfaces as [`DataError::UniqueViolation`].
    pub async fn create(client: &impl GenericClient, input: NewCompany) -> DataResult<Company> {
        let sql = format!(
            "INSERT INTO companies (handle, name, description, num_employees, logo_url) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {COMPANY_COLUMNS}"
        );
        let row = client
            .query_one(
                &sql,
                &[
                    &input.handle,
                    &input.name,
                    &input.description,
                    &input.num_employees,
                    &input.logo_url,
                ],
            )
            .await?;
        Company::from_row(&row)
    }

    /// List companies matching the filter, ordered by name.
    ///
    /// Rejects `min_employees > max_employees` with [`DataError::Validation`]
    /// before any SQL executes.
    pub async fn find_all(
        client: &impl GenericClient,
        filter: &CompanyFilter,
    ) -> DataResult<Vec<Company>> {
        let (sql, params) = filter.build_query()?;
        let params_ref = params.as_refs();
        let rows = client.query(&sql, &params_ref).await?;
        rows.iter().map(Company::from_row).collect()
    }

    /// Fetch a company by handle.
    pub async fn get(client: &impl GenericClient, handle: &str) -> DataResult<Company> {
        let sql = format!("SELECT {COMPANY_COLUMNS} FROM companies WHERE handle = $1");
        let row = client
            .query_opt(&sql, &[&handle])
            .await?
            .ok_or_else(|| DataError::not_found(format!("no company with handle {handle}")))?;
        Company::from_row(&row)
    }

    /// Fetch a company together with its job postings.
    pub async fn get_with_jobs(
        client: &impl GenericClient,
        handle: &str,
    ) -> DataResult<CompanyDetail> {
        let company = Company::get(client, handle).await?;
        let jobs = Job::find_all(
            client,
            &JobFilter {
                company_handle: Some(handle.to_string()),
                ..JobFilter::default()
            },
        )
        .await?;
        Ok(CompanyDetail { company, jobs })
    }

    /// Apply a partial update and return the updated company.
    pub async fn update(
        client: &impl GenericClient,
        handle: &str,
        patch: CompanyPatch,
    ) -> DataResult<Company> {
        let (sql, params) = update_statement(handle, patch)?;
        let params_ref = params.as_refs();
        let row = client
            .query_opt(&sql, &params_ref)
            .await?
            .ok_or_else(|| DataError::not_found(format!("no company with handle {handle}")))?;
        Company::from_row(&row)
    }

    /// Delete a company by handle. Its postings go with it (FK cascade).
    pub async fn remove(client: &impl GenericClient, handle: &str) -> DataResult<()> {
        let deleted = client
            .execute("DELETE FROM companies WHERE handle = $1", &[&handle])
            .await?;
        if deleted == 0 {
            return Err(DataError::not_found(format!(
                "no company with handle {handle}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_statement_translates_wire_names_to_columns() {
        let patch: CompanyPatch =
            serde_json::from_str(r#"{"numEmployees": 250, "logoUrl": null}"#).unwrap();

        let (sql, params) = update_statement("acme", patch).unwrap();
        assert_eq!(
            sql,
            format!(
                "UPDATE companies SET \"num_employees\"=$1, \"logo_url\"=$2 \
                 WHERE handle = $3 RETURNING {COMPANY_COLUMNS}"
            )
        );
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn untranslated_fields_keep_their_wire_names() {
        let patch = CompanyPatch {
            name: Some("Acme Corp".into()),
            description: Some("makers of everything".into()),
            ..CompanyPatch::default()
        };

        let (sql, _) = update_statement("acme", patch).unwrap();
        assert!(sql.contains(r#""name"=$1, "description"=$2"#));
    }

    #[test]
    fn empty_patch_fails_before_building_sql() {
        let err = update_statement("acme", CompanyPatch::default()).unwrap_err();
        assert!(err.is_empty_update());
    }

    #[test]
    fn filter_rejects_inverted_employee_bounds() {
        let filter = CompanyFilter {
            min_employees: Some(100),
            max_employees: Some(10),
            ..CompanyFilter::default()
        };
        let err = filter.build_query().unwrap_err();
        assert!(matches!(err, DataError::Validation(_)));
    }

    #[test]
    fn filter_binds_bounds_positionally() {
        let filter = CompanyFilter {
            name: Some("net".into()),
            min_employees: Some(10),
            max_employees: Some(500),
        };
        let (sql, params) = filter.build_query().unwrap();
        assert_eq!(
            sql,
            format!(
                "SELECT {COMPANY_COLUMNS} FROM companies \
                 WHERE name ILIKE $1 AND num_employees >= $2 AND num_employees <= $3 \
                 ORDER BY name"
            )
        );
        assert_eq!(params.len(), 3);
    }
}
