use std::sync::Arc;

use serde::Deserialize;

use crate::db::{
    dao::{NewTodo, TodoChanges, TodoStore},
    entities::todo,
};

use super::{ServiceError, ServiceResult, TodoId, UserId};

pub const MAX_TITLE_CHARS: usize = 255;

const TODO_NOT_FOUND: ServiceError = ServiceError::NotFound("Todo not found");

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewTodoInput {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Clone)]
pub struct TodoService {
    todos: Arc<dyn TodoStore>,
}

impl TodoService {
    pub fn new(todos: Arc<dyn TodoStore>) -> Self {
        Self { todos }
    }

    pub async fn list(&self, owner_id: i32) -> ServiceResult<Vec<todo::Model>> {
        let owner = UserId::new(owner_id)?;
        Ok(self.todos.list_by_owner(owner.get()).await?)
    }

    pub async fn get(&self, id: TodoId, owner_id: i32) -> ServiceResult<todo::Model> {
        let owner = UserId::new(owner_id)?;
        self.todos
            .find_by_id_and_owner(id.get(), owner.get())
            .await?
            .ok_or(TODO_NOT_FOUND)
    }

    pub async fn create(&self, input: NewTodoInput, owner_id: i32) -> ServiceResult<todo::Model> {
        let owner = UserId::new(owner_id)?;
        let title = validate_title(input.title.as_deref().unwrap_or_default())?;
        let description = input
            .description
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();

        let created = self
            .todos
            .create(NewTodo {
                title,
                description,
                user_id: owner.get(),
            })
            .await?;
        tracing::debug!(todo_id = created.id, user_id = owner.get(), "created todo");
        Ok(created)
    }

    pub async fn update(
        &self,
        id: TodoId,
        owner_id: i32,
        patch: TodoPatch,
    ) -> ServiceResult<todo::Model> {
        let existing = self.get(id, owner_id).await?;

        let title = validate_title(patch.title.as_deref().unwrap_or(&existing.title))?;
        let description = patch
            .description
            .as_deref()
            .map(|description| description.trim().to_string())
            .unwrap_or(existing.description);
        let completed = patch.completed.unwrap_or(existing.completed);

        self.todos
            .update(
                id.get(),
                existing.user_id,
                TodoChanges {
                    title,
                    description,
                    completed,
                },
            )
            .await?
            // removed between the read and the write
            .ok_or(TODO_NOT_FOUND)
    }

    pub async fn delete(&self, id: TodoId, owner_id: i32) -> ServiceResult<todo::Model> {
        let owner = UserId::new(owner_id)?;
        let deleted = self
            .todos
            .delete(id.get(), owner.get())
            .await?
            .ok_or(TODO_NOT_FOUND)?;
        tracing::debug!(todo_id = deleted.id, user_id = owner.get(), "deleted todo");
        Ok(deleted)
    }

    pub async fn toggle_completed(&self, id: TodoId, owner_id: i32) -> ServiceResult<todo::Model> {
        let owner = UserId::new(owner_id)?;
        self.todos
            .toggle_completed(id.get(), owner.get())
            .await?
            .ok_or(TODO_NOT_FOUND)
    }
}

/// Trims and checks a title; length is counted in characters.
fn validate_title(raw: &str) -> ServiceResult<String> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(ServiceError::validation(
            "Title is required and cannot be empty",
        ));
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(ServiceError::validation(format!(
            "Title cannot exceed {MAX_TITLE_CHARS} characters"
        )));
    }
    Ok(title.to_string())
}
