//! `staffhub-directory`: staff records and the visibility evaluator.
//!
//! The evaluator in [`visibility`] decides, for a viewer and a roster, which
//! profiles are visible and which controllable fields survive redaction. It is
//! pure: callers fetch the roster and the rules first, then filter.

pub mod department;
pub mod field;
pub mod hr;
pub mod matrix;
pub mod profile;
pub mod rule;
pub mod visibility;

pub use department::Department;
pub use field::{FieldSet, ProfileField};
pub use hr::{EmergencyContact, HrRecord};
pub use matrix::{Access, MatrixCell, PermissionMatrix};
pub use profile::{ProfileUpdate, StaffProfile};
pub use rule::{PermissionRule, RuleDraft, RuleKey};
pub use visibility::{VisibilityDecision, VisibilityPolicy, explain_visibility, visible_roster};
