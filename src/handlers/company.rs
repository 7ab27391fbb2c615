//! Company handlers: create, list, get, update, delete.

use crate::error::AppError;
use crate::extractors::AdminGuard;
use crate::handlers::json_object;
use crate::model::{CompanyField, NewCompany};
use crate::response::{deleted, success_many, success_one, success_one_ok};
use crate::service::validation::{COMPANY_NEW, COMPANY_UPDATE};
use crate::service::{CompanyService, RequestValidator};
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

/// Query string accepted by `GET /companies`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyQuery {
    pub name_like: Option<String>,
    pub min_employees: Option<i64>,
    pub max_employees: Option<i64>,
}

impl From<CompanyQuery> for FilterSpec {
    fn from(q: CompanyQuery) -> Self {
        FilterSpec {
            text_match: q.name_like,
            min_bound: q.min_employees,
            max_bound: q.max_employees,
            presence: None,
        }
    }
}

pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<CompanyQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let rows = CompanyService::list(&state.pool, &query.into()).await?;
    Ok(success_many(rows))
}

pub async fn create(
    _admin: AdminGuard,
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = json_object(body)?;
    RequestValidator::validate(&body, COMPANY_NEW)?;
    let new: NewCompany =
        serde_json::from_value(Value::Object(body)).map_err(|e| AppError::Validation(e.to_string()))?;
    let row = CompanyService::create(&state.pool, new).await?;
    Ok(success_one(row))
}

pub async fn read(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let detail = CompanyService::get(&state.pool, &handle).await?;
    Ok(success_one_ok(detail))
}

pub async fn update(
    _admin: AdminGuard,
    State(state): State<AppState>,
    Path(handle): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = json_object(body)?;
    RequestValidator::validate_partial(&body, COMPANY_UPDATE)?;
    let data = UpdateRequest::<CompanyField>::from_json(&body)?;
    let row = CompanyService::update(&state.pool, &handle, &data).await?;
    Ok(success_one_ok(row))
}

pub async fn delete(
    _admin: AdminGuard,
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    CompanyService::remove(&state.pool, &handle).await?;
    Ok(deleted(handle))
}
