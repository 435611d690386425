//! Process-local stores with the same ownership semantics as the SQL DAOs.
//! Used by tests and by `test_helpers`; nothing survives a restart.

use std::{cmp::Reverse, collections::BTreeMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::{DaoLayerError, DaoResult, NewTodo, NewUser, TodoChanges, TodoStore, UserStore};
use crate::db::entities::{todo, user};

struct Table<M> {
    next_id: i32,
    rows: BTreeMap<i32, M>,
}

impl<M> Default for Table<M> {
    fn default() -> Self {
        Self {
            next_id: 0,
            rows: BTreeMap::new(),
        }
    }
}

impl<M> Table<M> {
    fn allocate_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    table: Mutex<Table<user::Model>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops a user row, e.g. to simulate an account removed after a token was issued.
    pub async fn remove(&self, id: i32) -> Option<user::Model> {
        self.table.lock().await.rows.remove(&id)
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> DaoResult<Option<user::Model>> {
        let table = self.table.lock().await;
        Ok(table.rows.values().find(|row| row.email == email).cloned())
    }

    async fn find_by_id(&self, id: i32) -> DaoResult<Option<user::Model>> {
        Ok(self.table.lock().await.rows.get(&id).cloned())
    }

    async fn create_user(&self, new_user: NewUser) -> DaoResult<user::Model> {
        let mut table = self.table.lock().await;
        if table.rows.values().any(|row| row.email == new_user.email) {
            return Err(DaoLayerError::UniqueViolation(format!(
                "users.email = {}",
                new_user.email
            )));
        }

        let id = table.allocate_id();
        let model = user::Model {
            id,
            email: new_user.email,
            password_hash: new_user.password_hash,
            name: new_user.name,
            created_at: Utc::now().fixed_offset(),
        };
        table.rows.insert(id, model.clone());
        Ok(model)
    }
}

#[derive(Default)]
pub struct MemoryTodoStore {
    table: Mutex<Table<todo::Model>>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn owned_mut(
    rows: &mut BTreeMap<i32, todo::Model>,
    id: i32,
    owner_id: i32,
) -> Option<&mut todo::Model> {
    rows.get_mut(&id).filter(|row| row.user_id == owner_id)
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn list_by_owner(&self, owner_id: i32) -> DaoResult<Vec<todo::Model>> {
        let table = self.table.lock().await;
        let mut todos: Vec<todo::Model> = table
            .rows
            .values()
            .filter(|row| row.user_id == owner_id)
            .cloned()
            .collect();
        todos.sort_by_key(|row| Reverse((row.created_at, row.id)));
        Ok(todos)
    }

    async fn find_by_id_and_owner(
        &self,
        id: i32,
        owner_id: i32,
    ) -> DaoResult<Option<todo::Model>> {
        let table = self.table.lock().await;
        Ok(table
            .rows
            .get(&id)
            .filter(|row| row.user_id == owner_id)
            .cloned())
    }

    async fn create(&self, new_todo: NewTodo) -> DaoResult<todo::Model> {
        let mut table = self.table.lock().await;
        let id = table.allocate_id();
        let model = todo::Model {
            id,
            title: new_todo.title,
            description: new_todo.description,
            completed: false,
            user_id: new_todo.user_id,
            created_at: Utc::now().fixed_offset(),
        };
        table.rows.insert(id, model.clone());
        Ok(model)
    }

    async fn update(
        &self,
        id: i32,
        owner_id: i32,
        changes: TodoChanges,
    ) -> DaoResult<Option<todo::Model>> {
        let mut table = self.table.lock().await;
        Ok(owned_mut(&mut table.rows, id, owner_id).map(|row| {
            row.title = changes.title;
            row.description = changes.description;
            row.completed = changes.completed;
            row.clone()
        }))
    }

    async fn delete(&self, id: i32, owner_id: i32) -> DaoResult<Option<todo::Model>> {
        let mut table = self.table.lock().await;
        if owned_mut(&mut table.rows, id, owner_id).is_none() {
            return Ok(None);
        }
        Ok(table.rows.remove(&id))
    }

    async fn toggle_completed(&self, id: i32, owner_id: i32) -> DaoResult<Option<todo::Model>> {
        let mut table = self.table.lock().await;
        Ok(owned_mut(&mut table.rows, id, owner_id).map(|row| {
            row.completed = !row.completed;
            row.clone()
        }))
    }
}
