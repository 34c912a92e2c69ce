use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use staffhub_core::StaffId;

use crate::roles::known_roles;
use crate::{ClinicLocation, Role, SessionClaims};

/// The authenticated staff member on whose behalf a request runs.
///
/// Construction is decoupled from transport: the API derives it from verified
/// token claims, tests build it directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub staff_id: StaffId,
    pub roles: BTreeSet<Role>,
    pub locations: BTreeSet<ClinicLocation>,
}

impl Viewer {
    pub fn new(
        staff_id: StaffId,
        roles: impl IntoIterator<Item = Role>,
        locations: impl IntoIterator<Item = ClinicLocation>,
    ) -> Self {
        Self {
            staff_id,
            roles: roles.into_iter().collect(),
            locations: locations.into_iter().collect(),
        }
    }

    /// Build a viewer from verified claims.
    ///
    /// Role tags this build does not know are dropped rather than failing the
    /// whole session; the viewer simply holds fewer roles.
    pub fn from_claims(claims: &SessionClaims) -> Self {
        let roles = known_roles(&claims.roles);

        let locations = claims
            .locations
            .iter()
            .map(|l| ClinicLocation::new(l.clone()))
            .collect();

        Self {
            staff_id: claims.sub,
            roles,
            locations,
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.iter().any(|r| self.roles.contains(r))
    }

    pub fn holds_location(&self, location: &ClinicLocation) -> bool {
        self.locations.contains(location)
    }
}
