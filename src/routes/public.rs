use axum::{Router, routing::get};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::response::{ApiResponse, ApiResult};

#[derive(Debug, Serialize)]
pub struct StatusBanner {
    pub message: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    pub endpoints: Endpoints,
}

#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub auth: &'static str,
    pub todos: &'static str,
}

pub fn router() -> Router {
    Router::new().route("/", get(status))
}

async fn status() -> ApiResult<StatusBanner> {
    ApiResponse::ok(StatusBanner {
        message: "Todo API is running",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        endpoints: Endpoints {
            auth: "/api/auth",
            todos: "/api/todos",
        },
    })
}
