use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    config::AuthConfig,
    db::dao::{TodoDao, TodoStore, UserDao, UserStore},
};

use super::{AuthService, ServiceResult, TodoService};

/// Every service the HTTP layer can reach, wired to one set of stores.
#[derive(Clone)]
pub struct ServiceContext {
    pub auth: AuthService,
    pub todo: TodoService,
}

impl ServiceContext {
    pub fn new(db: &DatabaseConnection, cfg: &AuthConfig) -> ServiceResult<Self> {
        Self::with_stores(Arc::new(UserDao::new(db)), Arc::new(TodoDao::new(db)), cfg)
    }

    pub fn with_stores(
        users: Arc<dyn UserStore>,
        todos: Arc<dyn TodoStore>,
        cfg: &AuthConfig,
    ) -> ServiceResult<Self> {
        Ok(Self {
            auth: AuthService::new(users, cfg)?,
            todo: TodoService::new(todos),
        })
    }
}
