//! Permission matrix administration and visibility debugging.
//!
//! Every route here is limited to the admin role.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use staffhub_directory::RuleDraft;
use staffhub_infra::PortalError;

use crate::app::{dto, errors, services::AppServices};
use crate::context::ViewerContext;

// ─────────────────────────────────────────────────────────────────────────────
// Router
// ─────────────────────────────────────────────────────────────────────────────

pub fn router() -> Router {
    Router::new()
        .route("/permissions", get(get_matrix).put(upsert_rule))
        .route("/visibility/:id", get(explain_visibility))
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// GET /admin/permissions - full role × department grid, implicit denies included
pub async fn get_matrix(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(viewer): Extension<ViewerContext>,
) -> axum::response::Response {
    match services.portal.permission_matrix(&viewer).await {
        Ok(matrix) => (StatusCode::OK, Json(dto::MatrixResponse { cells: matrix.grid() })).into_response(),
        Err(e) => errors::portal_error_to_response(e),
    }
}

/// PUT /admin/permissions - upsert one rule by (viewer_role, target_department)
pub async fn upsert_rule(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(viewer): Extension<ViewerContext>,
    Json(body): Json<RuleDraft>,
) -> axum::response::Response {
    let rule = match body.into_rule() {
        Ok(rule) => rule,
        Err(e) => return errors::portal_error_to_response(PortalError::from(e)),
    };

    match services.portal.upsert_rule(&viewer, rule).await {
        Ok(saved) => (StatusCode::OK, Json(saved)).into_response(),
        Err(e) => errors::portal_error_to_response(e),
    }
}

/// GET /admin/visibility/:id?target=<id> - why `target` is or is not visible to `:id`
pub async fn explain_visibility(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(viewer): Extension<ViewerContext>,
    Path(id): Path<String>,
    Query(query): Query<dto::ExplainQuery>,
) -> axum::response::Response {
    let subject = match errors::parse_staff_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let target = match errors::parse_staff_id(&query.target) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.portal.explain(&viewer, subject, target).await {
        Ok(decision) => (
            StatusCode::OK,
            Json(dto::ExplainResponse {
                viewer_id: subject.to_string(),
                target_id: target.to_string(),
                decision,
            }),
        )
            .into_response(),
        Err(e) => errors::portal_error_to_response(e),
    }
}
