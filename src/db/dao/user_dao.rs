use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use super::{DaoResult, NewUser, UserStore};
use crate::db::entities::{prelude::User, user};

#[derive(Clone)]
pub struct UserDao {
    db: DatabaseConnection,
}

impl UserDao {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }
}

#[async_trait]
impl UserStore for UserDao {
    async fn find_by_email(&self, email: &str) -> DaoResult<Option<user::Model>> {
        Ok(User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?)
    }

    async fn find_by_id(&self, id: i32) -> DaoResult<Option<user::Model>> {
        Ok(User::find_by_id(id).one(&self.db).await?)
    }

    async fn create_user(&self, new_user: NewUser) -> DaoResult<user::Model> {
        let NewUser {
            email,
            password_hash,
            name,
        } = new_user;
        let model = user::ActiveModel {
            email: Set(email),
            password_hash: Set(password_hash),
            name: Set(name),
            created_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        };
        Ok(model.insert(&self.db).await?)
    }
}
