//! Portal operations: one awaited round trip per user action.
//!
//! Each operation authorizes first, then talks to the store, then converts
//! failures into [`PortalError`]. Denials never reveal whether a record exists.

use std::collections::BTreeSet;
use std::sync::Arc;

use staffhub_auth::{authorize, Action, Viewer};
use staffhub_core::StaffId;
use staffhub_directory::{
    Access, Department, HrRecord, PermissionMatrix, PermissionRule, ProfileUpdate, RuleKey, StaffProfile,
    VisibilityDecision, VisibilityPolicy, explain_visibility, visible_roster,
};

use crate::config::PortalConfig;
use crate::error::PortalError;
use crate::repositories::profiles::sort_by_name;
use crate::repositories::{HrRecordRepository, PermissionRuleRepository, ProfileRepository};
use crate::store::{RemoteTable, StoreError};

pub struct PortalService {
    profiles: ProfileRepository,
    hr_records: HrRecordRepository,
    rules: PermissionRuleRepository,
    policy: VisibilityPolicy,
}

/// Log a store failure where it happened and convert it.
fn store_failure(operation: &'static str, err: StoreError) -> PortalError {
    match &err {
        StoreError::NotFound => tracing::debug!(operation, "not found"),
        StoreError::Rejected(msg) => tracing::warn!(operation, "store rejected request: {msg}"),
        StoreError::Timeout(_) | StoreError::Unavailable(_) => tracing::error!(operation, "store call failed: {err}"),
    }
    PortalError::from(err)
}

impl PortalService {
    pub fn new(
        profiles: ProfileRepository,
        hr_records: HrRecordRepository,
        rules: PermissionRuleRepository,
        policy: VisibilityPolicy,
    ) -> Self {
        Self {
            profiles,
            hr_records,
            rules,
            policy,
        }
    }

    pub fn policy(&self) -> &VisibilityPolicy {
        &self.policy
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Directory
    // ─────────────────────────────────────────────────────────────────────────

    /// The directory as `viewer` may see it, sorted by name.
    pub async fn directory(&self, viewer: &Viewer) -> Result<Vec<StaffProfile>, PortalError> {
        if viewer.roles.is_empty() {
            return Ok(Vec::new());
        }

        let matrix = self
            .rules
            .matrix_for(&viewer.roles)
            .await
            .map_err(|e| store_failure("directory.rules", e))?;

        let departments: BTreeSet<Department> = Department::KNOWN
            .into_iter()
            .filter(|d| matrix.access_for_any(&viewer.roles, *d).is_granted())
            .collect();
        let locations = self
            .policy
            .location_gate_applies(viewer)
            .then_some(&viewer.locations);

        let mut roster = self
            .profiles
            .candidates(&departments, locations)
            .await
            .map_err(|e| store_failure("directory.profiles", e))?;

        // The viewer's own row may fall outside the narrowed fetch.
        if !roster.iter().any(|p| p.id == viewer.staff_id) {
            match self.profiles.get(viewer.staff_id).await {
                Ok(me) => {
                    roster.push(me);
                    sort_by_name(&mut roster);
                }
                Err(StoreError::NotFound) => {}
                Err(e) => return Err(store_failure("directory.self", e)),
            }
        }

        Ok(visible_roster(&self.policy, viewer, &matrix, &roster))
    }

    /// Admin-only: explain why `target` is or is not visible to `subject`.
    pub async fn explain(
        &self,
        viewer: &Viewer,
        subject: StaffId,
        target: StaffId,
    ) -> Result<VisibilityDecision, PortalError> {
        authorize(viewer, Action::EditPermissionMatrix)?;

        let subject = self
            .profiles
            .get(subject)
            .await
            .map_err(|e| store_failure("explain.subject", e))?;
        let target = self
            .profiles
            .get(target)
            .await
            .map_err(|e| store_failure("explain.target", e))?;
        let matrix = self.rules.matrix().await.map_err(|e| store_failure("explain.rules", e))?;

        let subject_viewer = Viewer::new(subject.id, subject.roles, subject.clinic_locations);
        Ok(explain_visibility(&self.policy, &subject_viewer, &matrix, &target))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Profiles
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn my_profile(&self, viewer: &Viewer) -> Result<StaffProfile, PortalError> {
        self.profiles
            .get(viewer.staff_id)
            .await
            .map_err(|e| store_failure("profile.get", e))
    }

    /// Self-service edit (or admin edit) of the profile owned by `target`.
    pub async fn update_profile(
        &self,
        viewer: &Viewer,
        target: StaffId,
        update: ProfileUpdate,
    ) -> Result<StaffProfile, PortalError> {
        authorize(viewer, Action::EditProfile(target))?;

        let current = self
            .profiles
            .get(target)
            .await
            .map_err(|e| store_failure("profile.get", e))?;
        let updated = update.apply(&current)?;

        let saved = self
            .profiles
            .save(updated)
            .await
            .map_err(|e| store_failure("profile.save", e))?;
        tracing::info!(viewer = %viewer.staff_id, profile = %target, "profile updated");
        Ok(saved)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // HR records
    // ─────────────────────────────────────────────────────────────────────────

    /// Privileged lookup of an HR record by staff id.
    ///
    /// The role check runs before the store is consulted, so a denied viewer
    /// gets `AccessDenied` whether or not the record exists.
    pub async fn hr_record(&self, viewer: &Viewer, staff_id: StaffId) -> Result<HrRecord, PortalError> {
        authorize(viewer, Action::ViewHrRecord(staff_id))?;

        self.hr_records
            .get(staff_id)
            .await
            .map_err(|e| store_failure("hr.get", e))
    }

    pub async fn save_hr_record(&self, viewer: &Viewer, record: HrRecord) -> Result<HrRecord, PortalError> {
        authorize(viewer, Action::EditHrRecord(record.staff_id))?;
        record.validate()?;

        let staff_id = record.staff_id;
        let saved = self
            .hr_records
            .save(record)
            .await
            .map_err(|e| store_failure("hr.save", e))?;
        tracing::info!(viewer = %viewer.staff_id, %staff_id, "hr record saved");
        Ok(saved)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Permission matrix
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn permission_matrix(&self, viewer: &Viewer) -> Result<PermissionMatrix, PortalError> {
        authorize(viewer, Action::EditPermissionMatrix)?;
        self.rules.matrix().await.map_err(|e| store_failure("rules.list", e))
    }

    /// Upsert one rule by composite key. Last writer wins.
    pub async fn upsert_rule(&self, viewer: &Viewer, rule: PermissionRule) -> Result<PermissionRule, PortalError> {
        authorize(viewer, Action::EditPermissionMatrix)?;
        rule.validate()?;
        let rule = rule.normalized();

        let saved = self
            .rules
            .upsert(rule)
            .await
            .map_err(|e| store_failure("rules.upsert", e))?;

        let access = if saved.can_view {
            Access::Granted(saved.visible_fields.clone())
        } else {
            Access::Denied
        };
        tracing::info!(viewer = %viewer.staff_id, rule = %saved.key(), ?access, "permission rule upserted");
        Ok(saved)
    }
}

/// Wire the service over shared tables.
pub fn portal_service(
    profiles: Arc<dyn RemoteTable<StaffId, StaffProfile>>,
    hr_records: Arc<dyn RemoteTable<StaffId, HrRecord>>,
    rules: Arc<dyn RemoteTable<RuleKey, PermissionRule>>,
    config: &PortalConfig,
) -> PortalService {
    PortalService::new(
        ProfileRepository::new(profiles, config.request_timeout),
        HrRecordRepository::new(hr_records, config.request_timeout),
        PermissionRuleRepository::new(rules, config.request_timeout),
        config.policy.clone(),
    )
}
