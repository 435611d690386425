use std::sync::Arc;

use axum::{Router, http::Uri, middleware};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    error::AppError,
    middleware::{catch_panic_layer, expose_error_detail, json_error_middleware},
    state::AppState,
};

use super::{api, public};

pub const API_PREFIX: &str = "/api";

/// Routes only; no cross-cutting layers.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(public::router())
        .nest(API_PREFIX, api::router(state))
        .fallback(route_not_found)
}

/// The full service as it is served: routes plus error shaping, panic
/// recovery, CORS and request tracing.
pub fn app(state: Arc<AppState>) -> Router {
    let development = state.is_development();
    let mut app = router(state)
        .layer(middleware::from_fn(json_error_middleware))
        .layer(catch_panic_layer());
    if development {
        app = app.layer(middleware::from_fn(expose_error_detail));
    }
    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn route_not_found(uri: Uri) -> AppError {
    tracing::debug!(path = %uri.path(), "no route matched");
    AppError::not_found("Route not found")
}
