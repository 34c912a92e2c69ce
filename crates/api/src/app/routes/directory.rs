use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::{dto, errors, services::AppServices};
use crate::context::ViewerContext;

/// GET /directory - every profile the viewer may see, hidden fields cleared
pub async fn list_directory(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(viewer): Extension<ViewerContext>,
) -> axum::response::Response {
    match services.portal.directory(&viewer).await {
        Ok(staff) => (StatusCode::OK, Json(dto::DirectoryResponse { staff })).into_response(),
        Err(e) => errors::portal_error_to_response(e),
    }
}
