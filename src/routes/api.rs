//! Entity, favorites and auth routes.
//! Favorites use one parameterized path; the handler resolves `:kind` to people, planets or vehicles.

use crate::handlers::auth::token;
use crate::handlers::catalog::{create, list, read};
use crate::handlers::favorites::{add_favorite, list_favorites, remove_favorite};
use crate::handlers::users::{create_user, list_users, me, read_user};
use crate::model::{People, Planet, Vehicle};
use crate::state::AppState;
use crate::store::Store;
use axum::{
    routing::{get, post},
    Router,
};

pub fn api_routes<S: Store>(state: AppState<S>) -> Router {
    Router::new()
        .route("/user", get(list_users::<S>).post(create_user::<S>))
        .route("/user/:id", get(read_user::<S>))
        .route("/user/:id/favorites", get(list_favorites::<S>))
        .route(
            "/user/:id/favorites/:kind/:target_id",
            post(add_favorite::<S>).delete(remove_favorite::<S>),
        )
        .route("/people", get(list::<S, People>).post(create::<S, People>))
        .route("/people/:id", get(read::<S, People>))
        .route("/planets", get(list::<S, Planet>).post(create::<S, Planet>))
        .route("/planets/:id", get(read::<S, Planet>))
        .route("/vehicles", get(list::<S, Vehicle>).post(create::<S, Vehicle>))
        .route("/vehicles/:id", get(read::<S, Vehicle>))
        .route("/token", post(token::<S>))
        .route("/me", get(me::<S>))
        .with_state(state)
}
