//! Fixtures for wiring the app without a database.

use std::sync::Arc;

use axum::Router;

use crate::{
    config::{AppConfig, AuthConfig, Environment},
    db::dao::{MemoryTodoStore, MemoryUserStore, TodoStore, UserStore},
    routes::app,
    services::ServiceContext,
    state::AppState,
};

pub const TEST_JWT_SECRET: &str = "test-secret";

/// Default config with a known secret and the cheapest argon2 cost the
/// validator allows.
pub fn test_config(environment: Environment) -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.general.environment = environment;
    cfg.auth = Some(AuthConfig {
        password_hash_memory_kib: 8,
        password_hash_iterations: 1,
        ..AuthConfig::with_secret(TEST_JWT_SECRET)
    });
    cfg
}

pub fn test_state_with_stores(
    environment: Environment,
    users: Arc<dyn UserStore>,
    todos: Arc<dyn TodoStore>,
) -> anyhow::Result<Arc<AppState>> {
    let cfg = test_config(environment);
    let auth = cfg
        .auth
        .clone()
        .ok_or_else(|| anyhow::anyhow!("test config has no auth section"))?;
    let services = ServiceContext::with_stores(users, todos, &auth)?;
    Ok(AppState::new(cfg, services))
}

pub fn test_state(environment: Environment) -> anyhow::Result<Arc<AppState>> {
    test_state_with_stores(
        environment,
        Arc::new(MemoryUserStore::new()),
        Arc::new(MemoryTodoStore::new()),
    )
}

/// Fully layered app over fresh in-memory stores.
pub fn test_app() -> anyhow::Result<Router> {
    Ok(app(test_state(Environment::Production)?))
}
