//! Shared application state for all routes.

use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    /// Bearer token accepted by write routes. `None` refuses all writes.
    pub admin_token: Option<Arc<str>>,
}

impl AppState {
    pub fn new(pool: PgPool, admin_token: Option<String>) -> Self {
        AppState {
            pool,
            admin_token: admin_token.map(Arc::from),
        }
    }
}
