use axum::{http::StatusCode, response::IntoResponse, Extension, Json};

use crate::app::dto;
use crate::context::ViewerContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(Extension(viewer): Extension<ViewerContext>) -> impl IntoResponse {
    Json(dto::viewer_to_json(viewer.viewer()))
}
