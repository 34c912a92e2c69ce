use thiserror::Error;

use staffhub_core::{DomainError, StaffId};

use crate::{Role, Viewer};

/// The single role allowed to edit the permission matrix.
pub const MATRIX_ADMIN_ROLE: Role = Role::Admin;

/// Roles allowed to read and write HR records.
pub const HR_PRIVILEGED_ROLES: [Role; 2] = [Role::Hr, Role::Executive];

/// A gated operation outside the directory evaluator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    ViewHrRecord(StaffId),
    EditHrRecord(StaffId),
    EditPermissionMatrix,
    /// Edit the profile owned by the given staff member.
    EditProfile(StaffId),
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Action::ViewHrRecord(id) => write!(f, "view hr record {id}"),
            Action::EditHrRecord(id) => write!(f, "edit hr record {id}"),
            Action::EditPermissionMatrix => f.write_str("edit permission matrix"),
            Action::EditProfile(id) => write!(f, "edit profile {id}"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("access denied: {action} requires one of [{required}]")]
    MissingRole { action: String, required: String },

    #[error("access denied: {0} is not your own profile")]
    NotOwner(String),
}

impl From<AuthzError> for DomainError {
    fn from(value: AuthzError) -> Self {
        DomainError::AccessDenied(value.to_string())
    }
}

/// Decide whether `viewer` may perform `action`.
///
/// - No IO
/// - No panics
/// - Pure role/ownership check; never consults whether the target exists
pub fn authorize(viewer: &Viewer, action: Action) -> Result<(), AuthzError> {
    let allowed = match action {
        Action::ViewHrRecord(_) | Action::EditHrRecord(_) => viewer.has_any_role(&HR_PRIVILEGED_ROLES),
        Action::EditPermissionMatrix => viewer.has_role(MATRIX_ADMIN_ROLE),
        Action::EditProfile(target) if viewer.staff_id != target && !viewer.has_role(MATRIX_ADMIN_ROLE) => {
            tracing::warn!(viewer = %viewer.staff_id, %action, "denied");
            return Err(AuthzError::NotOwner(target.to_string()));
        }
        Action::EditProfile(_) => true,
    };

    if allowed {
        return Ok(());
    }

    tracing::warn!(viewer = %viewer.staff_id, %action, "denied");
    Err(AuthzError::MissingRole {
        action: action.to_string(),
        required: required_roles(action)
            .iter()
            .map(Role::as_str)
            .collect::<Vec<_>>()
            .join(", "),
    })
}

fn required_roles(action: Action) -> &'static [Role] {
    match action {
        Action::ViewHrRecord(_) | Action::EditHrRecord(_) => &HR_PRIVILEGED_ROLES,
        Action::EditPermissionMatrix | Action::EditProfile(_) => &[MATRIX_ADMIN_ROLE],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer(roles: &[Role]) -> Viewer {
        Viewer::new(StaffId::new(), roles.iter().copied(), [])
    }

    #[test]
    fn hr_records_need_privileged_role() {
        let target = StaffId::new();
        assert!(authorize(&viewer(&[Role::Hr]), Action::ViewHrRecord(target)).is_ok());
        assert!(authorize(&viewer(&[Role::Executive]), Action::EditHrRecord(target)).is_ok());

        let err = authorize(&viewer(&[Role::Rmt, Role::Management]), Action::ViewHrRecord(target)).unwrap_err();
        assert!(matches!(&err, AuthzError::MissingRole { required, .. } if required == "hr, executive"));
    }

    #[test]
    fn only_admin_edits_matrix() {
        assert!(authorize(&viewer(&[Role::Admin]), Action::EditPermissionMatrix).is_ok());
        assert!(authorize(&viewer(&[Role::Executive, Role::Hr]), Action::EditPermissionMatrix).is_err());
    }

    #[test]
    fn profile_edits_are_self_service_or_admin() {
        let me = viewer(&[Role::Staff]);
        assert!(authorize(&me, Action::EditProfile(me.staff_id)).is_ok());

        let other = StaffId::new();
        assert!(matches!(
            authorize(&me, Action::EditProfile(other)),
            Err(AuthzError::NotOwner(_))
        ));
        assert!(authorize(&viewer(&[Role::Admin]), Action::EditProfile(other)).is_ok());
    }

    #[test]
    fn converts_to_access_denied() {
        let err: DomainError = authorize(&viewer(&[]), Action::EditPermissionMatrix)
            .unwrap_err()
            .into();
        assert!(matches!(err, DomainError::AccessDenied(_)));
    }
}
