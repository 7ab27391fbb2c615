//! Job access: create, list, get with company, partial update, remove.

use crate::error::AppError;
use crate::model::{Company, Job, JobDetail, JobField, NewJob, COMPANIES, JOBS, JOB_COLUMNS, JOB_FILTERS};
use crate::service::crud::{fetch_all, fetch_optional, fetch_optional_scalar, is_foreign_key_violation};
use crate::sql::{build_where, delete, insert, select_by_pk, select_list, sql_for_partial_update, update, FilterSpec, SqlValue, UpdateRequest};
use sqlx::PgPool;

pub struct JobService;

impl JobService {
    /// Insert a job for an existing company.
    pub async fn create(pool: &PgPool, new: NewJob) -> Result<Job, AppError> {
        let company_handle = new.company_handle.clone();
        let q = insert(&JOBS, new.into_columns()?);
        match fetch_optional::<Job>(pool, q).await {
            Ok(Some(row)) => {
                tracing::info!(id = row.id, company = %row.company_handle, "job created");
                Ok(row)
            }
            Ok(None) => Err(AppError::Internal("job insert returned no row".into())),
            Err(e) if is_foreign_key_violation(&e) => {
                Err(AppError::Validation(format!("no such company: {}", company_handle)))
            }
            Err(e) => Err(e),
        }
    }

    /// All jobs matching `filter`, ordered by title.
    pub async fn list(pool: &PgPool, filter: &FilterSpec) -> Result<Vec<Job>, AppError> {
        let where_clause = build_where(filter, &JOB_FILTERS)?;
        fetch_all(pool, select_list(&JOBS, where_clause)).await
    }

    /// One job plus the company that posted it (two round trips).
    pub async fn get(pool: &PgPool, id: i64) -> Result<JobDetail, AppError> {
        let job: Job = fetch_optional(pool, select_by_pk(&JOBS, SqlValue::from(id)))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("job: {}", id)))?;
        let company: Company = fetch_optional(pool, select_by_pk(&COMPANIES, SqlValue::from(job.company_handle.as_str())))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("company: {}", job.company_handle)))?;
        Ok(JobDetail::new(job, company))
    }

    /// Change only the supplied fields. An empty request fails before touching the database.
    pub async fn update(pool: &PgPool, id: i64, data: &UpdateRequest<JobField>) -> Result<Job, AppError> {
        let set = sql_for_partial_update(data, &JOB_COLUMNS)?;
        let q = update(&JOBS, set, SqlValue::from(id));
        let row = fetch_optional::<Job>(pool, q)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("job: {}", id)))?;
        tracing::info!(id = id, fields = data.len(), "job updated");
        Ok(row)
    }

    pub async fn remove(pool: &PgPool, id: i64) -> Result<(), AppError> {
        let deleted: Option<i32> = fetch_optional_scalar(pool, delete(&JOBS, SqlValue::from(id))).await?;
        if deleted.is_none() {
            return Err(AppError::NotFound(format!("job: {}", id)));
        }
        tracing::info!(id = id, "job removed");
        Ok(())
    }
}
