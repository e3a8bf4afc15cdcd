//! People, planets and vehicles: list, read, create. One generic handler set per [`Resource`].

use crate::error::AppError;
use crate::extractors::ApiJson;
use crate::model::{NewResource, Resource};
use crate::response::{success_many, success_one_ok};
use crate::service::RequestValidator;
use crate::state::AppState;
use crate::store::Store;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

pub(crate) fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str
        .parse::<i32>()
        .map_err(|_| AppError::BadRequest(format!("invalid id: {}", id_str)))
}

/// GET /<table>
pub async fn list<S: Store, T: Resource>(
    State(state): State<AppState<S>>,
) -> Result<impl IntoResponse, AppError> {
    let rows = state.store.list::<T>().await?;
    Ok(success_many(rows))
}

/// GET /<table>/:id
pub async fn read<S: Store, T: Resource>(
    State(state): State<AppState<S>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = state
        .store
        .find::<T>(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} {} not found", T::LABEL, id)))?;
    Ok(success_one_ok(row))
}

/// POST /<table>
pub async fn create<S: Store, T: Resource>(
    State(state): State<AppState<S>>,
    ApiJson(body): ApiJson<T::New>,
) -> Result<impl IntoResponse, AppError> {
    RequestValidator::validate_attributes(T::COLUMNS, &body.values())?;
    let row = state.store.create::<T>(body).await?;
    tracing::info!(table = T::TABLE, id = row.id(), "row created");
    Ok(success_one_ok(row))
}
