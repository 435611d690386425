use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::AppError;

pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// Successful handler output: the payload is serialized as the whole body.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub status: StatusCode,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> ApiResult<T> {
        Self::with_status(StatusCode::OK, data)
    }

    pub fn created(data: T) -> ApiResult<T> {
        Self::with_status(StatusCode::CREATED, data)
    }

    pub fn with_status(status: StatusCode, data: T) -> ApiResult<T> {
        Ok(Self { status, data })
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.data)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Internal failure detail riding along on a 500 response. Only the
/// development-mode layer turns it into body content.
#[derive(Debug, Clone)]
pub struct ErrorDetail(pub String);

pub fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    let body = ErrorBody {
        error: error.into(),
        message: None,
    };
    (status, Json(body)).into_response()
}

pub fn log_app_error(err: &AppError) {
    let status = err.status();
    if status.is_server_error() {
        tracing::error!(status = status.as_u16(), error = %err.message(), "request failed");
    } else {
        tracing::debug!(status = status.as_u16(), error = %err.message(), "request rejected");
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        log_app_error(&self);
        let mut response = error_response(self.status(), self.public_message());
        if let AppError::Internal(detail) = self {
            response.extensions_mut().insert(ErrorDetail(detail));
        }
        response
    }
}
