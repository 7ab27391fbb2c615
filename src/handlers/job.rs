//! Job handlers: create, list, get, update, delete.

use crate::error::AppError;
use crate::extractors::AdminGuard;
use crate::handlers::json_object;
use crate::model::{JobField, NewJob};
use crate::response::{deleted, success_many, success_one, success_one_ok};
use crate::service::validation::{JOB_NEW, JOB_UPDATE};
use crate::service::{JobService, RequestValidator};
use crate::sql::{FilterSpec, UpdateRequest};
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::Value;

/// Query string accepted by `GET /jobs`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobQuery {
    pub title: Option<String>,
    pub min_salary: Option<i64>,
    pub has_equity: Option<bool>,
}

impl From<JobQuery> for FilterSpec {
    fn from(q: JobQuery) -> Self {
        FilterSpec {
            text_match: q.title,
            min_bound: q.min_salary,
            max_bound: None,
            presence: q.has_equity,
        }
    }
}

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid job id: {}", id_str)))
}

pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<JobQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let rows = JobService::list(&state.pool, &query.into()).await?;
    Ok(success_many(rows))
}

pub async fn create(
    _admin: AdminGuard,
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = json_object(body)?;
    RequestValidator::validate(&body, JOB_NEW)?;
    let new: NewJob =
        serde_json::from_value(Value::Object(body)).map_err(|e| AppError::Validation(e.to_string()))?;
    let row = JobService::create(&state.pool, new).await?;
    Ok(success_one(row))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let detail = JobService::get(&state.pool, id).await?;
    Ok(success_one_ok(detail))
}

pub async fn update(
    _admin: AdminGuard,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let body = json_object(body)?;
    RequestValidator::validate_partial(&body, JOB_UPDATE)?;
    let data = UpdateRequest::<JobField>::from_json(&body)?;
    let row = JobService::update(&state.pool, id, &data).await?;
    Ok(success_one_ok(row))
}

pub async fn delete(
    _admin: AdminGuard,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    JobService::remove(&state.pool, id).await?;
    Ok(deleted(id))
}
