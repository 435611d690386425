use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    sea_query::{Expr, ExprTrait},
};

use super::{DaoResult, NewTodo, TodoChanges, TodoStore};
use crate::db::entities::{prelude::Todo, todo};

#[derive(Clone)]
pub struct TodoDao {
    db: DatabaseConnection,
}

impl TodoDao {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }
}

fn owned(id: i32, owner_id: i32) -> sea_orm::Condition {
    sea_orm::Condition::all()
        .add(todo::Column::Id.eq(id))
        .add(todo::Column::UserId.eq(owner_id))
}

#[async_trait]
impl TodoStore for TodoDao {
    async fn list_by_owner(&self, owner_id: i32) -> DaoResult<Vec<todo::Model>> {
        Ok(Todo::find()
            .filter(todo::Column::UserId.eq(owner_id))
            .order_by_desc(todo::Column::CreatedAt)
            .order_by_desc(todo::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn find_by_id_and_owner(
        &self,
        id: i32,
        owner_id: i32,
    ) -> DaoResult<Option<todo::Model>> {
        Ok(Todo::find().filter(owned(id, owner_id)).one(&self.db).await?)
    }

    async fn create(&self, new_todo: NewTodo) -> DaoResult<todo::Model> {
        let model = todo::ActiveModel {
            title: Set(new_todo.title),
            description: Set(new_todo.description),
            completed: Set(false),
            user_id: Set(new_todo.user_id),
            created_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        };
        Ok(model.insert(&self.db).await?)
    }

    async fn update(
        &self,
        id: i32,
        owner_id: i32,
        changes: TodoChanges,
    ) -> DaoResult<Option<todo::Model>> {
        let updated = Todo::update_many()
            .col_expr(todo::Column::Title, Expr::value(changes.title))
            .col_expr(todo::Column::Description, Expr::value(changes.description))
            .col_expr(todo::Column::Completed, Expr::value(changes.completed))
            .filter(owned(id, owner_id))
            .exec_with_returning(&self.db)
            .await?;
        Ok(updated.into_iter().next())
    }

    async fn delete(&self, id: i32, owner_id: i32) -> DaoResult<Option<todo::Model>> {
        let deleted = Todo::delete_many()
            .filter(owned(id, owner_id))
            .exec_with_returning(&self.db)
            .await?;
        Ok(deleted.into_iter().next())
    }

    async fn toggle_completed(&self, id: i32, owner_id: i32) -> DaoResult<Option<todo::Model>> {
        let toggled = Todo::update_many()
            .col_expr(
                todo::Column::Completed,
                Expr::col(todo::Column::Completed).not(),
            )
            .filter(owned(id, owner_id))
            .exec_with_returning(&self.db)
            .await?;
        Ok(toggled.into_iter().next())
    }
}
