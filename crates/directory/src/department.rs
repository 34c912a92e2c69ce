use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serialize};

/// Department a staff member belongs to.
///
/// Tags are read through [`Department::parse`] wherever they come from
/// (stored rows, seed files, rule drafts). Values this build does not
/// recognise become [`Department::Unknown`], which no permission rule can
/// ever match.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    Clinical,
    FrontDesk,
    Administration,
    Finance,
    HumanResources,
    Marketing,
    Management,
    Executive,
    Unknown,
}

impl Department {
    /// Every department a rule may target.
    pub const KNOWN: [Department; 8] = [
        Department::Clinical,
        Department::FrontDesk,
        Department::Administration,
        Department::Finance,
        Department::HumanResources,
        Department::Marketing,
        Department::Management,
        Department::Executive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Clinical => "clinical",
            Department::FrontDesk => "front_desk",
            Department::Administration => "administration",
            Department::Finance => "finance",
            Department::HumanResources => "human_resources",
            Department::Marketing => "marketing",
            Department::Management => "management",
            Department::Executive => "executive",
            Department::Unknown => "unknown",
        }
    }

    /// Lenient parse: anything unrecognised is `Unknown`.
    pub fn parse(s: &str) -> Self {
        let needle = s.trim().to_ascii_lowercase();
        Department::KNOWN
            .into_iter()
            .find(|d| d.as_str() == needle)
            .unwrap_or(Department::Unknown)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Department::Unknown)
    }
}

impl core::fmt::Display for Department {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Department {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = Cow::<'de, str>::deserialize(deserializer)?;
        Ok(Department::parse(&tag))
    }
}
