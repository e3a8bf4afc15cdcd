mod api;
mod common;

pub use api::api_routes;
pub use common::{common_routes, ENDPOINTS};

use crate::state::AppState;
use crate::store::Store;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Request bodies above this size are rejected with 413.
pub const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// The full application: common + API routes with body limit and request tracing.
pub fn app<S: Store>(state: AppState<S>) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(api_routes(state))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
}
