pub mod error;
pub mod memory;
pub mod store;
pub mod todo_dao;
pub mod user_dao;

pub use error::{DaoLayerError, DaoResult};
pub use memory::{MemoryTodoStore, MemoryUserStore};
pub use store::{NewTodo, NewUser, TodoChanges, TodoStore, UserStore};
pub use todo_dao::TodoDao;
pub use user_dao::UserDao;
