//! POST /token: email/password in, bearer token out.
//! Every refusal gets the same body and costs one argon2 verification.

use crate::error::AppError;
use crate::extractors::ApiJson;
use crate::service::{verify_password, AccessToken, RequestValidator, DUMMY_HASH};
use crate::state::AppState;
use crate::store::Store;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

const BAD_CREDENTIALS: &str = "bad email or password";

#[derive(Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

pub async fn token<S: Store>(
    State(state): State<AppState<S>>,
    ApiJson(body): ApiJson<LoginBody>,
) -> Result<Json<AccessToken>, AppError> {
    RequestValidator::validate_login(&body.email, &body.password)?;
    let email = body.email.trim();

    let Some(creds) = state.store.find_credentials(email).await? else {
        verify_password(body.password, DUMMY_HASH.to_string()).await?;
        tracing::warn!("token refused: unknown email");
        return Err(AppError::Unauthorized(BAD_CREDENTIALS.into()));
    };
    if !verify_password(body.password, creds.password_hash).await? {
        tracing::warn!(user_id = creds.id, "token refused: password mismatch");
        return Err(AppError::Unauthorized(BAD_CREDENTIALS.into()));
    }
    if !creds.is_active {
        tracing::warn!(user_id = creds.id, "token refused: inactive account");
        return Err(AppError::Unauthorized(BAD_CREDENTIALS.into()));
    }

    let token = state.tokens.issue(&creds.email)?;
    tracing::info!(user_id = creds.id, "token issued");
    Ok(Json(token))
}
