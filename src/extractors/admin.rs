//! Admin gate for write routes: `Authorization: Bearer <token>` must match the configured token.

use crate::error::AppError;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

/// Present in a handler's arguments means the caller is an admin.
#[derive(Clone, Copy, Debug)]
pub struct AdminGuard;

#[async_trait]
impl FromRequestParts<AppState> for AdminGuard {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.admin_token.as_deref() else {
            tracing::warn!(path = %parts.uri.path(), "write refused: no admin token configured");
            return Err(AppError::Unauthorized);
        };
        let presented = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token);
        match presented {
            Some(token) if token == expected => Ok(AdminGuard),
            _ => {
                tracing::warn!(path = %parts.uri.path(), "write refused: missing or invalid admin token");
                Err(AppError::Unauthorized)
            }
        }
    }
}

fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
