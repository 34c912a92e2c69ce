//! Portal error taxonomy.
//!
//! Every failure a portal operation can surface falls into one of four kinds.
//! Store and domain errors are converted at the call site; nothing bubbles up
//! as a panic.

use thiserror::Error;

use staffhub_auth::AuthzError;
use staffhub_core::DomainError;

use crate::store::StoreError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PortalError {
    /// A keyed fetch returned nothing.
    #[error("not found")]
    NotFound,

    /// The viewer may not perform the operation (distinct from `NotFound`).
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// Network failure or timeout; prior state is left unchanged, no retry.
    #[error("transient network error: {0}")]
    TransientNetwork(String),

    /// Malformed input (e.g. a rule without a usable composite key).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl PortalError {
    /// Message suitable for showing to the person at the keyboard.
    pub fn user_message(&self) -> String {
        match self {
            PortalError::NotFound => "The requested record does not exist.".to_string(),
            PortalError::AccessDenied(_) => "You do not have permission to do that.".to_string(),
            PortalError::TransientNetwork(_) => {
                "Could not reach the server. Your changes were not saved; please try again.".to_string()
            }
            PortalError::Validation(msg) => format!("Please check your input: {msg}."),
        }
    }
}

impl From<StoreError> for PortalError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound => PortalError::NotFound,
            StoreError::Timeout(_) | StoreError::Unavailable(_) => PortalError::TransientNetwork(value.to_string()),
            StoreError::Rejected(msg) => PortalError::Validation(msg),
        }
    }
}

impl From<DomainError> for PortalError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::NotFound => PortalError::NotFound,
            DomainError::AccessDenied(msg) => PortalError::AccessDenied(msg),
            DomainError::Validation(msg) | DomainError::InvalidId(msg) => PortalError::Validation(msg),
        }
    }
}

impl From<AuthzError> for PortalError {
    fn from(value: AuthzError) -> Self {
        PortalError::AccessDenied(value.to_string())
    }
}
