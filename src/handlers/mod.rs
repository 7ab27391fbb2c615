//! HTTP handlers for company and job CRUD.

pub mod company;
pub mod job;

use crate::error::AppError;
use crate::service::validation::body_object;
use axum::{extract::rejection::JsonRejection, Json};
use serde_json::{Map, Value};

/// Unwrap a JSON body that must be an object. Malformed JSON or a missing
/// `Content-Type` is reported in the usual error envelope.
pub(crate) fn json_object(body: Result<Json<Value>, JsonRejection>) -> Result<Map<String, Value>, AppError> {
    let Json(value) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    body_object(value)
}
