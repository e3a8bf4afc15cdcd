//! Users: list, read, register, and the caller's own record.

use crate::error::AppError;
use crate::extractors::{ApiJson, BearerClaims};
use crate::handlers::catalog::parse_id;
use crate::model::{NewUser, UserInsert};
use crate::response::{success_many, success_one_ok};
use crate::service::{hash_password, RequestValidator};
use crate::state::AppState;
use crate::store::Store;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

pub async fn list_users<S: Store>(State(state): State<AppState<S>>) -> Result<impl IntoResponse, AppError> {
    let users = state.store.list_users().await?;
    Ok(success_many(users))
}

pub async fn read_user<S: Store>(
    State(state): State<AppState<S>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let user = state
        .store
        .find_user(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {} not found", id)))?;
    Ok(success_one_ok(user))
}

/// POST /user. The password is stored only as an argon2 hash.
pub async fn create_user<S: Store>(
    State(state): State<AppState<S>>,
    ApiJson(body): ApiJson<NewUser>,
) -> Result<impl IntoResponse, AppError> {
    RequestValidator::validate_new_user(&body)?;
    let password_hash = hash_password(body.password).await?;
    let user = state
        .store
        .create_user(UserInsert {
            email: body.email.trim().to_string(),
            password_hash,
            name: body.name,
            is_active: body.is_active.unwrap_or(true),
        })
        .await?;
    tracing::info!(user_id = user.id, "user registered");
    Ok(success_one_ok(user))
}

/// GET /me
pub async fn me<S: Store>(
    State(state): State<AppState<S>>,
    BearerClaims(claims): BearerClaims,
) -> Result<impl IntoResponse, AppError> {
    let creds = state
        .store
        .find_credentials(&claims.sub)
        .await?
        .ok_or_else(|| AppError::Unauthorized("token subject no longer exists".into()))?;
    let user = state
        .store
        .find_user(creds.id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("token subject no longer exists".into()))?;
    Ok(success_one_ok(user))
}
