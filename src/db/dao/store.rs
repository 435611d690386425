use async_trait::async_trait;

use super::DaoResult;
use crate::db::entities::{todo, user};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub user_id: i32,
}

/// Full replacement values for an existing todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoChanges {
    pub title: String,
    pub description: String,
    pub completed: bool,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> DaoResult<Option<user::Model>>;
    async fn find_by_id(&self, id: i32) -> DaoResult<Option<user::Model>>;
    /// Fails with `UniqueViolation` when the email is taken.
    async fn create_user(&self, new_user: NewUser) -> DaoResult<user::Model>;
}

/// Every lookup and mutation is keyed by `(id, owner_id)`; a row owned by
/// somebody else behaves exactly like a missing row.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Newest first.
    async fn list_by_owner(&self, owner_id: i32) -> DaoResult<Vec<todo::Model>>;
    async fn find_by_id_and_owner(&self, id: i32, owner_id: i32)
    -> DaoResult<Option<todo::Model>>;
    async fn create(&self, new_todo: NewTodo) -> DaoResult<todo::Model>;
    async fn update(
        &self,
        id: i32,
        owner_id: i32,
        changes: TodoChanges,
    ) -> DaoResult<Option<todo::Model>>;
    async fn delete(&self, id: i32, owner_id: i32) -> DaoResult<Option<todo::Model>>;
    /// Flips `completed` in a single statement.
    async fn toggle_completed(&self, id: i32, owner_id: i32) -> DaoResult<Option<todo::Model>>;
}
