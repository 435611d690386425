use axum::{
    Json,
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{
    error::INTERNAL_ERROR_MESSAGE,
    response::{ErrorBody, ErrorDetail},
};

/// Development only: re-renders 500 responses with the failure detail in
/// a `message` field next to `error`.
pub async fn expose_error_detail(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let Some(ErrorDetail(detail)) = response.extensions_mut().remove::<ErrorDetail>() else {
        return response;
    };

    let body = ErrorBody {
        error: INTERNAL_ERROR_MESSAGE.to_string(),
        message: Some(detail),
    };
    let (mut parts, _) = response.into_parts();
    parts.headers.remove(axum::http::header::CONTENT_LENGTH);
    let rendered = Json(body).into_response();
    let (rendered_parts, rendered_body) = rendered.into_parts();
    parts.headers.extend(rendered_parts.headers);
    Response::from_parts(parts, rendered_body)
}
