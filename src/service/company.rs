//! Company access: create, list, get with jobs, partial update, remove.

use crate::error::AppError;
use crate::model::{Company, CompanyDetail, CompanyField, Job, NewCompany, COMPANIES, COMPANY_COLUMNS, COMPANY_FILTERS, JOBS};
use crate::service::crud::{fetch_all, fetch_optional, fetch_optional_scalar, is_unique_violation};
use crate::sql::{build_where, delete, insert, select_by_column, select_by_pk, select_list, sql_for_partial_update, update, FilterSpec, SqlValue, UpdateRequest};
use sqlx::PgPool;

pub struct CompanyService;

impl CompanyService {
    /// Insert a company. A taken handle or name is a duplicate.
    pub async fn create(pool: &PgPool, new: NewCompany) -> Result<Company, AppError> {
        let handle = new.handle.clone();
        let q = insert(&COMPANIES, new.into_columns());
        match fetch_optional::<Company>(pool, q).await {
            Ok(Some(row)) => {
                tracing::info!(handle = %row.handle, "company created");
                Ok(row)
            }
            Ok(None) => Err(AppError::Internal("company insert returned no row".into())),
            Err(e) if is_unique_violation(&e) => Err(AppError::Duplicate(format!("duplicate company: {}", handle))),
            Err(e) => Err(e),
        }
    }

    /// All companies matching `filter`, ordered by name.
    pub async fn list(pool: &PgPool, filter: &FilterSpec) -> Result<Vec<Company>, AppError> {
        let where_clause = build_where(filter, &COMPANY_FILTERS)?;
        fetch_all(pool, select_list(&COMPANIES, where_clause)).await
    }

    /// One company plus its jobs (two round trips).
    pub async fn get(pool: &PgPool, handle: &str) -> Result<CompanyDetail, AppError> {
        let company: Company = fetch_optional(pool, select_by_pk(&COMPANIES, SqlValue::from(handle)))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("company: {}", handle)))?;
        let jobs: Vec<Job> = fetch_all(pool, select_by_column(&JOBS, "company_handle", SqlValue::from(handle))).await?;
        Ok(CompanyDetail { company, jobs })
    }

    /// Change only the supplied fields. An empty request fails before touching the database.
    pub async fn update(
        pool: &PgPool,
        handle: &str,
        data: &UpdateRequest<CompanyField>,
    ) -> Result<Company, AppError> {
        let set = sql_for_partial_update(data, &COMPANY_COLUMNS)?;
        let q = update(&COMPANIES, set, SqlValue::from(handle));
        let row = fetch_optional::<Company>(pool, q)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("company: {}", handle)))?;
        tracing::info!(handle = %handle, fields = data.len(), "company updated");
        Ok(row)
    }

    /// Delete a company (its jobs cascade).
    pub async fn remove(pool: &PgPool, handle: &str) -> Result<(), AppError> {
        let deleted: Option<String> = fetch_optional_scalar(pool, delete(&COMPANIES, SqlValue::from(handle))).await?;
        if deleted.is_none() {
            return Err(AppError::NotFound(format!("company: {}", handle)));
        }
        tracing::info!(handle = %handle, "company removed");
        Ok(())
    }
}
