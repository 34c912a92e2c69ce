//! `staffhub-auth`: who the viewer is and what the viewer may do.
//!
//! This crate is intentionally decoupled from HTTP and storage: it turns
//! verified session claims into a [`Viewer`] and answers the simple
//! role-gated questions (HR access, matrix administration, profile edits).

pub mod authorize;
pub mod claims;
pub mod jwt;
pub mod location;
pub mod principal;
pub mod roles;
pub mod session;

pub use authorize::{authorize, Action, AuthzError, HR_PRIVILEGED_ROLES, MATRIX_ADMIN_ROLE};
pub use claims::{SessionClaims, TokenValidationError, validate_claims};
pub use jwt::{Hs256JwtValidator, JwtValidator};
pub use location::ClinicLocation;
pub use principal::Viewer;
pub use roles::{Role, UnknownRole, deserialize_known_roles, known_roles};
pub use session::{InMemorySessionProvider, SessionEvent, SessionProvider, Subscription};
