//! JSON seed import for dev and demo deployments.
//!
//! Profiles and HR records are created outside the portal; a seed file is how
//! they get into a fresh in-memory store. Rows are written straight to the
//! tables, bypassing viewer authorization.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use staffhub_core::{Entity, StaffId};
use staffhub_directory::{HrRecord, PermissionRule, RuleKey, StaffProfile};

use crate::store::RemoteTable;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub profiles: Vec<StaffProfile>,
    #[serde(default)]
    pub hr_records: Vec<HrRecord>,
    #[serde(default)]
    pub rules: Vec<PermissionRule>,
}

/// Rows written by [`SeedData::apply`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub profiles: usize,
    pub hr_records: usize,
    pub rules: usize,
    pub skipped: usize,
}

impl SeedData {
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw).context("invalid seed document")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path).with_context(|| format!("reading seed file {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("parsing seed file {}", path.display()))
    }

    /// Write every valid row. Invalid HR records and rules are skipped with a
    /// warning; a store failure aborts the import.
    pub async fn apply(
        self,
        profiles: &dyn RemoteTable<StaffId, StaffProfile>,
        hr_records: &dyn RemoteTable<StaffId, HrRecord>,
        rules: &dyn RemoteTable<RuleKey, PermissionRule>,
    ) -> anyhow::Result<SeedReport> {
        let mut report = SeedReport::default();

        for profile in self.profiles {
            let id = *profile.id();
            profiles
                .upsert(id, profile)
                .await
                .with_context(|| format!("seeding profile {id}"))?;
            report.profiles += 1;
        }

        for record in self.hr_records {
            if let Err(e) = record.validate() {
                tracing::warn!(staff_id = %record.staff_id, "skipping seed hr record: {e}");
                report.skipped += 1;
                continue;
            }
            let id = record.staff_id;
            hr_records
                .upsert(id, record)
                .await
                .with_context(|| format!("seeding hr record {id}"))?;
            report.hr_records += 1;
        }

        for rule in self.rules {
            if let Err(e) = rule.validate() {
                tracing::warn!("skipping seed rule: {e}");
                report.skipped += 1;
                continue;
            }
            let rule = rule.normalized();
            let key = rule.key();
            rules
                .upsert(key, rule)
                .await
                .with_context(|| format!("seeding rule {key}"))?;
            report.rules += 1;
        }

        tracing::info!(
            profiles = report.profiles,
            hr_records = report.hr_records,
            rules = report.rules,
            skipped = report.skipped,
            "seed applied"
        );
        Ok(report)
    }
}
