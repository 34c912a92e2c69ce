use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use staffhub_core::{DomainError, DomainResult, Entity, StaffId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    #[serde(default)]
    pub relationship: Option<String>,
    pub phone: String,
}

/// Sensitive HR data, keyed 1:1 by the staff member's id.
///
/// Only fetched on demand by privileged viewers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HrRecord {
    pub staff_id: StaffId,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub national_id: Option<String>,
    #[serde(default)]
    pub emergency_contact: Option<EmergencyContact>,
    #[serde(default)]
    pub termination_date: Option<NaiveDate>,
}

impl HrRecord {
    pub fn empty(staff_id: StaffId) -> Self {
        Self {
            staff_id,
            birth_date: None,
            national_id: None,
            emergency_contact: None,
            termination_date: None,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if let (Some(born), Some(terminated)) = (self.birth_date, self.termination_date) {
            if terminated <= born {
                return Err(DomainError::validation("termination_date must be after birth_date"));
            }
        }
        if self.national_id.as_deref().is_some_and(|id| id.trim().is_empty()) {
            return Err(DomainError::validation("national_id cannot be blank"));
        }
        if let Some(contact) = &self.emergency_contact {
            if contact.name.trim().is_empty() || contact.phone.trim().is_empty() {
                return Err(DomainError::validation("emergency contact needs a name and a phone"));
            }
        }
        Ok(())
    }
}

impl Entity for HrRecord {
    type Id = StaffId;

    fn id(&self) -> &Self::Id {
        &self.staff_id
    }
}
