//! Common routes: sitemap, health, readiness, version, OpenAPI components.

use crate::model::{NewPeople, NewPlanet, NewUser, NewVehicle, People, Planet, User, Vehicle};
use crate::state::AppState;
use crate::store::Store;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use utoipa::OpenApi;

/// Every endpoint served, as `(method, path)`.
pub const ENDPOINTS: &[(&str, &str)] = &[
    ("GET", "/"),
    ("GET", "/health"),
    ("GET", "/ready"),
    ("GET", "/version"),
    ("GET", "/openapi.json"),
    ("GET", "/user"),
    ("POST", "/user"),
    ("GET", "/user/:id"),
    ("GET", "/user/:id/favorites"),
    ("POST", "/user/:id/favorites/people/:people_id"),
    ("DELETE", "/user/:id/favorites/people/:people_id"),
    ("POST", "/user/:id/favorites/planets/:planet_id"),
    ("DELETE", "/user/:id/favorites/planets/:planet_id"),
    ("POST", "/user/:id/favorites/vehicles/:vehicle_id"),
    ("DELETE", "/user/:id/favorites/vehicles/:vehicle_id"),
    ("GET", "/people"),
    ("POST", "/people"),
    ("GET", "/people/:id"),
    ("GET", "/planets"),
    ("POST", "/planets"),
    ("GET", "/planets/:id"),
    ("GET", "/vehicles"),
    ("POST", "/vehicles"),
    ("GET", "/vehicles/:id"),
    ("POST", "/token"),
    ("GET", "/me"),
];

#[derive(OpenApi)]
#[openapi(components(schemas(User, NewUser, People, NewPeople, Planet, NewPlanet, Vehicle, NewVehicle)))]
struct ApiDoc;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadyBody {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'static str>,
}

#[derive(Serialize)]
struct Endpoint {
    method: &'static str,
    path: &'static str,
}

async fn sitemap() -> Json<serde_json::Value> {
    let endpoints: Vec<Endpoint> = ENDPOINTS
        .iter()
        .map(|&(method, path)| Endpoint { method, path })
        .collect();
    Json(serde_json::json!({ "endpoints": endpoints }))
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

async fn ready<S: Store>(
    State(state): State<AppState<S>>,
) -> Result<Json<ReadyBody>, (StatusCode, Json<ReadyBody>)> {
    if let Err(e) = state.store.ping().await {
        tracing::warn!(error = %e, "readiness check failed");
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyBody {
                status: "degraded",
                database: Some("unavailable"),
            }),
        ));
    }
    Ok(Json(ReadyBody {
        status: "ok",
        database: Some("ok"),
    }))
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// GET /, /health, /ready, /version, /openapi.json.
pub fn common_routes<S: Store>(state: AppState<S>) -> Router {
    Router::new()
        .route("/", get(sitemap))
        .route("/health", get(health))
        .route("/ready", get(ready::<S>))
        .route("/version", get(version))
        .route("/openapi.json", get(openapi))
        .with_state(state)
}
