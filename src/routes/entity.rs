//! Company and job CRUD routes. Writes are gated by [`crate::extractors::AdminGuard`] in the handlers.

use crate::handlers::{company, job};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn entity_routes(state: AppState) -> Router {
    Router::new()
        .route("/companies", get(company::list).post(company::create))
        .route(
            "/companies/:handle",
            get(company::read).patch(company::update).delete(company::delete),
        )
        .route("/jobs", get(job::list).post(job::create))
        .route("/jobs/:id", get(job::read).patch(job::update).delete(job::delete))
        .with_state(state)
}
