//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store and portal service wiring, seed import
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use staffhub_infra::PortalConfig;
use staffhub_infra::seed::SeedData;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// Loads the seed file named in `config`, if any.
pub async fn build_app(config: &PortalConfig) -> anyhow::Result<Router> {
    let seed = match &config.seed_file {
        Some(path) => SeedData::load(path)?,
        None => SeedData::default(),
    };
    build_app_with_seed(config, seed).await
}

/// Build the router over in-memory tables pre-populated with `seed`.
pub async fn build_app_with_seed(config: &PortalConfig, seed: SeedData) -> anyhow::Result<Router> {
    let jwt = Arc::new(staffhub_auth::Hs256JwtValidator::new(config.jwt_secret.clone().into_bytes()));
    let auth_state = middleware::AuthState { jwt };

    let services = Arc::new(services::build_services(config, seed).await?);

    // Protected routes: require a verified session.
    let protected = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Ok(Router::new()
        .route("/health", get(routes::system::health))
        .merge(protected)
        .layer(ServiceBuilder::new()))
}
