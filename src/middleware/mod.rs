mod auth;
mod error_detail;
mod json_error;
mod panic;

pub use auth::{bearer_token, require_auth};
pub use error_detail::expose_error_detail;
pub use json_error::json_error_middleware;
pub use panic::catch_panic_layer;
