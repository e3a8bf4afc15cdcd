//! Extract and verify the bearer token from the `Authorization` header.

use crate::error::AppError;
use crate::service::Claims;
use crate::state::AppState;
use crate::store::Store;
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

const BEARER_PREFIX: &str = "Bearer ";

/// Verified claims of the caller's token. Rejects with 401 when absent or invalid.
#[derive(Clone, Debug)]
pub struct BearerClaims(pub Claims);

#[async_trait]
impl<S> FromRequestParts<AppState<S>> for BearerClaims
where
    S: Store,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState<S>) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix(BEARER_PREFIX))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::Unauthorized("missing bearer token".into()))?;
        let claims = state.tokens.verify(token)?;
        Ok(BearerClaims(claims))
    }
}
