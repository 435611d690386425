pub mod auth_service;
pub mod context;
pub mod error;
pub mod ids;
pub mod todo_service;

pub use auth_service::AuthService;
pub use context::ServiceContext;
pub use error::{ServiceError, ServiceResult};
pub use ids::{TodoId, UserId};
pub use todo_service::{NewTodoInput, TodoPatch, TodoService};
