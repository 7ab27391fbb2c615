//! Statement execution against PostgreSQL. Every statement is logged with its parameters.

use crate::error::AppError;
use crate::sql::QueryBuf;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

pub(crate) async fn fetch_all<T>(pool: &PgPool, q: QueryBuf) -> Result<Vec<T>, AppError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    let mut query = sqlx::query_as::<_, T>(&q.sql);
    for p in q.params {
        query = query.bind(p);
    }
    Ok(query.fetch_all(pool).await?)
}

pub(crate) async fn fetch_optional<T>(pool: &PgPool, q: QueryBuf) -> Result<Option<T>, AppError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    let mut query = sqlx::query_as::<_, T>(&q.sql);
    for p in q.params {
        query = query.bind(p);
    }
    Ok(query.fetch_optional(pool).await?)
}

/// Run a statement returning a single scalar column (e.g. `RETURNING pk`).
pub(crate) async fn fetch_optional_scalar<T>(pool: &PgPool, q: QueryBuf) -> Result<Option<T>, AppError>
where
    (T,): for<'r> FromRow<'r, PgRow>,
    T: Send + Unpin,
{
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    let mut query = sqlx::query_scalar::<_, T>(&q.sql);
    for p in q.params {
        query = query.bind(p);
    }
    Ok(query.fetch_optional(pool).await?)
}

/// True when the error is a unique-constraint violation.
pub(crate) fn is_unique_violation(e: &AppError) -> bool {
    match e {
        AppError::Db(sqlx::Error::Database(db)) => db.is_unique_violation(),
        _ => false,
    }
}

/// True when the error is a foreign-key violation.
pub(crate) fn is_foreign_key_violation(e: &AppError) -> bool {
    match e {
        AppError::Db(sqlx::Error::Database(db)) => db.is_foreign_key_violation(),
        _ => false,
    }
}
