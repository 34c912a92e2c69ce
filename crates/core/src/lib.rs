//! `staffhub-core`: shared building blocks for the staff directory.
//!
//! This crate holds identifiers, the error taxonomy and the entity marker.
//! It has no knowledge of roles, storage or transport.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::StaffId;
