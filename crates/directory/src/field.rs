use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Profile field whose visibility is controlled by the permission matrix.
///
/// Name, job title, department and locations are not listed: they are always
/// visible to a viewer who passes the department gate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Phone,
    Bio,
    Email,
    LicenseNumber,
}

impl ProfileField {
    pub const ALL: [ProfileField; 4] = [
        ProfileField::Phone,
        ProfileField::Bio,
        ProfileField::Email,
        ProfileField::LicenseNumber,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileField::Phone => "phone",
            ProfileField::Bio => "bio",
            ProfileField::Email => "email",
            ProfileField::LicenseNumber => "license_number",
        }
    }
}

impl core::fmt::Display for ProfileField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of controllable fields. Fields not in the set are hidden.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSet(BTreeSet<ProfileField>);

impl FieldSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        ProfileField::ALL.into_iter().collect()
    }

    pub fn contains(&self, field: ProfileField) -> bool {
        self.0.contains(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn insert(&mut self, field: ProfileField) -> bool {
        self.0.insert(field)
    }

    pub fn extend_from(&mut self, other: &FieldSet) {
        self.0.extend(other.0.iter().copied());
    }

    pub fn iter(&self) -> impl Iterator<Item = ProfileField> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<ProfileField> for FieldSet {
    fn from_iter<T: IntoIterator<Item = ProfileField>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[ProfileField; N]> for FieldSet {
    fn from(value: [ProfileField; N]) -> Self {
        value.into_iter().collect()
    }
}
