use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use staffhub_auth::{ClinicLocation, Role};
use staffhub_core::{DomainError, DomainResult, Entity, StaffId};

use crate::{Department, FieldSet, ProfileField};

/// Directory entry for one staff member.
///
/// HR data is never part of this struct; see [`crate::HrRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffProfile {
    pub id: StaffId,
    pub full_name: String,
    #[serde(default)]
    pub job_title: Option<String>,
    pub department: Department,
    /// Unknown role tags in stored rows are dropped with a warning.
    #[serde(default, deserialize_with = "staffhub_auth::deserialize_known_roles")]
    pub roles: BTreeSet<Role>,
    #[serde(default)]
    pub clinic_locations: BTreeSet<ClinicLocation>,

    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub license_number: Option<String>,
}

impl StaffProfile {
    pub fn new(id: StaffId, full_name: impl Into<String>, department: Department) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            job_title: None,
            department,
            roles: BTreeSet::new(),
            clinic_locations: BTreeSet::new(),
            phone: None,
            bio: None,
            email: None,
            license_number: None,
        }
    }

    pub fn field(&self, field: ProfileField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    fn slot(&self, field: ProfileField) -> &Option<String> {
        match field {
            ProfileField::Phone => &self.phone,
            ProfileField::Bio => &self.bio,
            ProfileField::Email => &self.email,
            ProfileField::LicenseNumber => &self.license_number,
        }
    }

    fn slot_mut(&mut self, field: ProfileField) -> &mut Option<String> {
        match field {
            ProfileField::Phone => &mut self.phone,
            ProfileField::Bio => &mut self.bio,
            ProfileField::Email => &mut self.email,
            ProfileField::LicenseNumber => &mut self.license_number,
        }
    }

    /// Clear every controllable field not in `visible`.
    pub fn redact(&mut self, visible: &FieldSet) {
        for field in ProfileField::ALL {
            if !visible.contains(field) {
                *self.slot_mut(field) = None;
            }
        }
    }

    /// True when the profile shares at least one clinic location with `locations`.
    pub fn works_at_any(&self, locations: &BTreeSet<ClinicLocation>) -> bool {
        !self.clinic_locations.is_disjoint(locations)
    }
}

impl Entity for StaffProfile {
    type Id = StaffId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Self-service profile edit.
///
/// `None` leaves a field untouched; `Some("")` (or whitespace) clears it.
/// Department, roles and locations are managed elsewhere and cannot be set here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub license_number: Option<String>,
}

impl ProfileUpdate {
    /// Validate and apply onto `profile`, returning the updated copy.
    pub fn apply(&self, profile: &StaffProfile) -> DomainResult<StaffProfile> {
        let mut updated = profile.clone();

        if let Some(title) = &self.job_title {
            updated.job_title = normalize(title);
        }
        if let Some(phone) = &self.phone {
            let phone = normalize(phone);
            if let Some(p) = &phone {
                validate_phone(p)?;
            }
            updated.phone = phone;
        }
        if let Some(bio) = &self.bio {
            updated.bio = normalize(bio);
        }
        if let Some(email) = &self.email {
            let email = normalize(email);
            if let Some(e) = &email {
                validate_email(e)?;
            }
            updated.email = email.map(|e| e.to_lowercase());
        }
        if let Some(license) = &self.license_number {
            updated.license_number = normalize(license);
        }

        Ok(updated)
    }
}

fn normalize(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn validate_phone(phone: &str) -> DomainResult<()> {
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')' | '+' | '.'));

    if !allowed || !(7..=15).contains(&digits) {
        return Err(DomainError::validation("phone must contain 7 to 15 digits"));
    }
    Ok(())
}

fn validate_email(email: &str) -> DomainResult<()> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(DomainError::validation("invalid email format")),
    }
}
