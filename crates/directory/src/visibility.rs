//! Row-level visibility and field redaction for the staff directory.
//!
//! Evaluation order for one target:
//!
//! ```text
//! viewer has no roles        -> hidden (nothing at all is visible)
//! target is the viewer       -> visible, unredacted
//! location gate              -> hidden unless locations intersect
//! department gate            -> hidden unless any role is granted
//! field redaction            -> keep fields granted by any granting role
//! ```
//!
//! The evaluator never fails: unknown departments, missing rules and stale
//! field lists all degrade to "hidden".

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use staffhub_auth::{ClinicLocation, Role, Viewer};

use crate::{Access, Department, FieldSet, PermissionMatrix, StaffProfile};

/// Deployment-level knobs of the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityPolicy {
    /// Holding any of these roles confines the viewer to their own locations.
    pub location_scoped_roles: BTreeSet<Role>,
    /// Location that lifts the location gate for scoped viewers.
    pub all_locations: ClinicLocation,
}

impl Default for VisibilityPolicy {
    fn default() -> Self {
        Self {
            location_scoped_roles: BTreeSet::from([Role::Management]),
            all_locations: ClinicLocation::HEADQUARTER,
        }
    }
}

impl VisibilityPolicy {
    pub fn location_gate_applies(&self, viewer: &Viewer) -> bool {
        !viewer.roles.is_disjoint(&self.location_scoped_roles) && !viewer.holds_location(&self.all_locations)
    }
}

/// Why a target is (or is not) visible to a viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum VisibilityDecision {
    NoRoles,
    OwnProfile,
    OutsideLocations,
    DepartmentDenied { department: Department },
    Visible { visible_fields: FieldSet },
}

impl VisibilityDecision {
    pub fn is_visible(&self) -> bool {
        matches!(self, VisibilityDecision::OwnProfile | VisibilityDecision::Visible { .. })
    }
}

/// Decide visibility of a single target.
pub fn explain_visibility(
    policy: &VisibilityPolicy,
    viewer: &Viewer,
    matrix: &PermissionMatrix,
    target: &StaffProfile,
) -> VisibilityDecision {
    if viewer.roles.is_empty() {
        return VisibilityDecision::NoRoles;
    }
    if target.id == viewer.staff_id {
        return VisibilityDecision::OwnProfile;
    }
    if policy.location_gate_applies(viewer) && !target.works_at_any(&viewer.locations) {
        return VisibilityDecision::OutsideLocations;
    }
    match matrix.access_for_any(&viewer.roles, target.department) {
        Access::Granted(visible_fields) => VisibilityDecision::Visible { visible_fields },
        Access::Denied => VisibilityDecision::DepartmentDenied {
            department: target.department,
        },
    }
}

/// Filter `roster` down to what `viewer` may see, redacting hidden fields.
///
/// Roster order is preserved.
pub fn visible_roster(
    policy: &VisibilityPolicy,
    viewer: &Viewer,
    matrix: &PermissionMatrix,
    roster: &[StaffProfile],
) -> Vec<StaffProfile> {
    if viewer.roles.is_empty() {
        tracing::debug!(viewer = %viewer.staff_id, "viewer holds no roles; directory is empty");
        return Vec::new();
    }

    let visible: Vec<StaffProfile> = roster
        .iter()
        .filter_map(|target| match explain_visibility(policy, viewer, matrix, target) {
            VisibilityDecision::OwnProfile => Some(target.clone()),
            VisibilityDecision::Visible { visible_fields } => {
                let mut profile = target.clone();
                profile.redact(&visible_fields);
                Some(profile)
            }
            _ => None,
        })
        .collect();

    tracing::debug!(
        viewer = %viewer.staff_id,
        roster = roster.len(),
        visible = visible.len(),
        "directory evaluated"
    );
    visible
}
