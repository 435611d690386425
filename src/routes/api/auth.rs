use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    middleware,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{AuthSession, AuthUser, UserProfile},
    middleware::require_auth,
    response::{ApiResponse, ApiResult},
    routes::extract::JsonBody,
    state::AppState,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserProfile,
}

pub fn router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .merge(protected)
        .with_state(state)
}

async fn register(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> ApiResult<AuthSession> {
    let session = state
        .services
        .auth
        .register(
            body.email.as_deref().unwrap_or_default(),
            body.password.as_deref().unwrap_or_default(),
            body.name.as_deref().unwrap_or_default(),
        )
        .await?;
    ApiResponse::created(session)
}

async fn login(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> ApiResult<AuthSession> {
    let session = state
        .services
        .auth
        .login(
            body.email.as_deref().unwrap_or_default(),
            body.password.as_deref().unwrap_or_default(),
        )
        .await?;
    ApiResponse::ok(session)
}

async fn me(State(state): State<Arc<AppState>>, user: AuthUser) -> ApiResult<MeResponse> {
    let user = state.services.auth.user_profile(user.user_id).await?;
    ApiResponse::ok(MeResponse { user })
}
