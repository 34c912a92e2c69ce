//! Infrastructure layer: remote store access, repositories, portal services,
//! configuration and seed import.
//!
//! Every remote call is a single awaited round trip bounded by the configured
//! timeout. Nothing here retries.

pub mod config;
pub mod error;
pub mod matrix_editor;
pub mod repositories;
pub mod seed;
pub mod services;
pub mod store;

pub use config::PortalConfig;
pub use error::PortalError;
pub use matrix_editor::MatrixEditor;
pub use services::PortalService;
