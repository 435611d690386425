pub mod api;
mod entry;
pub mod extract;
pub mod public;

pub use entry::{API_PREFIX, app, router};
