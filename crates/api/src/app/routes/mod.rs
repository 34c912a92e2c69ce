use axum::{routing::get, Router};

pub mod admin;
pub mod directory;
pub mod hr;
pub mod profiles;
pub mod system;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .route("/directory", get(directory::list_directory))
        .route("/profile/me", get(profiles::my_profile))
        .nest("/profiles", profiles::router())
        .nest("/hr", hr::router())
        .nest("/admin", admin::router())
}
