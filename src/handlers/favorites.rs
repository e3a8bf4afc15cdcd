//! Favorites of a user: aggregated listing, add, remove.

use crate::error::AppError;
use crate::handlers::catalog::parse_id;
use crate::model::FavoriteKind;
use crate::response::success_one_ok;
use crate::state::AppState;
use crate::store::Store;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

fn parse_kind(segment: &str) -> Result<FavoriteKind, AppError> {
    FavoriteKind::from_segment(segment)
        .ok_or_else(|| AppError::NotFound(format!("unknown favorite kind: {}", segment)))
}

fn parse_target(params: &(String, String, String)) -> Result<(i32, FavoriteKind, i32), AppError> {
    let (user_id, kind, target_id) = params;
    Ok((parse_id(user_id)?, parse_kind(kind)?, parse_id(target_id)?))
}

/// GET /user/:id/favorites
pub async fn list_favorites<S: Store>(
    State(state): State<AppState<S>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = parse_id(&id_str)?;
    let favorites = state
        .store
        .favorites_of(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {} not found", user_id)))?;
    Ok(success_one_ok(favorites))
}

/// POST /user/:id/favorites/:kind/:target_id
pub async fn add_favorite<S: Store>(
    State(state): State<AppState<S>>,
    Path(params): Path<(String, String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let (user_id, kind, target_id) = parse_target(&params)?;
    let favorite = state.store.add_favorite(kind, user_id, target_id).await?;
    tracing::info!(user_id, kind = kind.segment(), target_id, "favorite added");
    Ok(success_one_ok(favorite))
}

/// DELETE /user/:id/favorites/:kind/:target_id
pub async fn remove_favorite<S: Store>(
    State(state): State<AppState<S>>,
    Path(params): Path<(String, String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let (user_id, kind, target_id) = parse_target(&params)?;
    let removed = state
        .store
        .remove_favorite(kind, user_id, target_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "user {} has no {} {} favorite",
                user_id,
                kind.label(),
                target_id
            ))
        })?;
    tracing::info!(user_id, kind = kind.segment(), target_id, "favorite removed");
    Ok(success_one_ok(removed))
}
