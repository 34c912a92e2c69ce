use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::put,
    Json, Router,
};

use staffhub_directory::ProfileUpdate;

use crate::app::{errors, services::AppServices};
use crate::context::ViewerContext;

pub fn router() -> Router {
    Router::new().route("/:id", put(update_profile))
}

/// GET /profile/me - the viewer's own, unredacted profile
pub async fn my_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(viewer): Extension<ViewerContext>,
) -> axum::response::Response {
    match services.portal.my_profile(&viewer).await {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(e) => errors::portal_error_to_response(e),
    }
}

/// PUT /profiles/:id - self-service (or admin) edit of contact fields
pub async fn update_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(viewer): Extension<ViewerContext>,
    Path(id): Path<String>,
    Json(body): Json<ProfileUpdate>,
) -> axum::response::Response {
    let id = match errors::parse_staff_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.portal.update_profile(&viewer, id, body).await {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(e) => errors::portal_error_to_response(e),
    }
}
