use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

use super::{auth, todos};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/auth", auth::router(state.clone()))
        .nest("/todos", todos::router(state))
}
