use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use staffhub_core::StaffId;
use staffhub_infra::PortalError;

pub fn portal_error_to_response(err: PortalError) -> axum::response::Response {
    let message = err.user_message();
    match err {
        PortalError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", message),
        PortalError::AccessDenied(_) => json_error(StatusCode::FORBIDDEN, "forbidden", message),
        PortalError::Validation(_) => json_error(StatusCode::BAD_REQUEST, "validation_error", message),
        PortalError::TransientNetwork(_) => json_error(StatusCode::SERVICE_UNAVAILABLE, "unavailable", message),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn parse_staff_id(raw: &str) -> Result<StaffId, axum::response::Response> {
    raw.parse()
        .map_err(|e: staffhub_core::DomainError| json_error(StatusCode::BAD_REQUEST, "invalid_id", e.to_string()))
}
