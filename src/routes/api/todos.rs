use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    middleware,
    routing::{get, patch},
};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Serialize;

use crate::{
    auth::AuthUser,
    db::entities::todo,
    error::AppError,
    middleware::require_auth,
    response::{ApiResponse, ApiResult},
    routes::extract::JsonBody,
    services::{NewTodoInput, TodoId, TodoPatch},
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct TodoResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub user_id: i32,
    pub created_at: DateTimeWithTimeZone,
}

impl From<todo::Model> for TodoResponse {
    fn from(model: todo::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            completed: model.completed,
            user_id: model.user_id,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeletedTodo {
    pub message: &'static str,
    pub todo: TodoResponse,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(list_todos).post(create_todo))
        .route(
            "/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route("/{id}/toggle", patch(toggle_todo))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
}

fn parse_id(raw: &str) -> Result<TodoId, AppError> {
    Ok(raw.parse::<TodoId>()?)
}

async fn list_todos(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> ApiResult<Vec<TodoResponse>> {
    let todos = state.services.todo.list(user.user_id).await?;
    ApiResponse::ok(todos.into_iter().map(TodoResponse::from).collect())
}

async fn get_todo(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<TodoResponse> {
    let todo = state
        .services
        .todo
        .get(parse_id(&id)?, user.user_id)
        .await?;
    ApiResponse::ok(todo.into())
}

async fn create_todo(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    JsonBody(body): JsonBody<NewTodoInput>,
) -> ApiResult<TodoResponse> {
    let todo = state.services.todo.create(body, user.user_id).await?;
    ApiResponse::created(todo.into())
}

async fn update_todo(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<TodoPatch>,
) -> ApiResult<TodoResponse> {
    let todo = state
        .services
        .todo
        .update(parse_id(&id)?, user.user_id, body)
        .await?;
    ApiResponse::ok(todo.into())
}

async fn delete_todo(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<DeletedTodo> {
    let todo = state
        .services
        .todo
        .delete(parse_id(&id)?, user.user_id)
        .await?;
    ApiResponse::ok(DeletedTodo {
        message: "Todo deleted successfully",
        todo: todo.into(),
    })
}

async fn toggle_todo(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<TodoResponse> {
    let todo = state
        .services
        .todo
        .toggle_completed(parse_id(&id)?, user.user_id)
        .await?;
    ApiResponse::ok(todo.into())
}
