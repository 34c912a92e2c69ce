//! HR record routes. Restricted to HR and executive roles; the role check
//! runs before the lookup, so forbidden callers cannot probe for records.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::{dto, errors, services::AppServices};
use crate::context::ViewerContext;

pub fn router() -> Router {
    Router::new().route("/:id", get(get_hr_record).put(save_hr_record))
}

/// GET /hr/:id
pub async fn get_hr_record(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(viewer): Extension<ViewerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match errors::parse_staff_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.portal.hr_record(&viewer, id).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => errors::portal_error_to_response(e),
    }
}

/// PUT /hr/:id
pub async fn save_hr_record(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(viewer): Extension<ViewerContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::HrRecordRequest>,
) -> axum::response::Response {
    let id = match errors::parse_staff_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.portal.save_hr_record(&viewer, body.into_record(id)).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => errors::portal_error_to_response(e),
    }
}
