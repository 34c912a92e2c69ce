use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Clinic location tag (e.g. "Burnaby", "Richmond").
///
/// Locations are open-ended strings: clinics open and close without a code
/// change. Comparison is exact.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClinicLocation(Cow<'static, str>);

impl ClinicLocation {
    /// Marker location granting location-scoped viewers every location.
    pub const HEADQUARTER: ClinicLocation = ClinicLocation(Cow::Borrowed("Headquarter"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ClinicLocation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for ClinicLocation {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}
