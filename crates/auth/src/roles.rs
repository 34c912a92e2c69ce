use core::str::FromStr;
use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Role tag held by a staff member.
///
/// Roles are a closed set so that a typo in a rule or a token cannot silently
/// create a new, never-matching role.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Edits the permission matrix.
    Admin,
    Executive,
    Hr,
    /// Clinic managers; directory visibility is scoped to their locations.
    Management,
    ClinicalProvider,
    /// Registered massage therapist.
    Rmt,
    FrontDesk,
    Staff,
}

impl Role {
    pub const ALL: [Role; 8] = [
        Role::Admin,
        Role::Executive,
        Role::Hr,
        Role::Management,
        Role::ClinicalProvider,
        Role::Rmt,
        Role::FrontDesk,
        Role::Staff,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Executive => "executive",
            Role::Hr => "hr",
            Role::Management => "management",
            Role::ClinicalProvider => "clinical_provider",
            Role::Rmt => "rmt",
            Role::FrontDesk => "front_desk",
            Role::Staff => "staff",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == needle)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// Parse role tags, dropping (and logging) the ones this build does not know.
///
/// Used for every external source of roles: session tokens and stored
/// profiles alike.
pub fn known_roles<I, S>(tags: I) -> BTreeSet<Role>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .filter_map(|tag| match tag.as_ref().parse::<Role>() {
            Ok(role) => Some(role),
            Err(e) => {
                tracing::warn!("dropping role tag: {e}");
                None
            }
        })
        .collect()
}

/// `deserialize_with` helper applying [`known_roles`] to a list of tags.
pub fn deserialize_known_roles<'de, D>(deserializer: D) -> Result<BTreeSet<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let tags = Vec::<String>::deserialize(deserializer)?;
    Ok(known_roles(tags))
}
