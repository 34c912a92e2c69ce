use std::sync::Arc;

use staffhub_core::StaffId;
use staffhub_directory::{HrRecord, PermissionRule, RuleKey, StaffProfile};
use staffhub_infra::seed::SeedData;
use staffhub_infra::services::portal_service;
use staffhub_infra::store::InMemoryTable;
use staffhub_infra::{PortalConfig, PortalService};

/// Shared state handed to every handler.
pub struct AppServices {
    pub portal: PortalService,
}

/// In-memory wiring (dev/test): three tables, seeded, behind one service.
pub async fn build_services(config: &PortalConfig, seed: SeedData) -> anyhow::Result<AppServices> {
    let profiles: Arc<InMemoryTable<StaffId, StaffProfile>> = Arc::new(InMemoryTable::new());
    let hr_records: Arc<InMemoryTable<StaffId, HrRecord>> = Arc::new(InMemoryTable::new());
    let rules: Arc<InMemoryTable<RuleKey, PermissionRule>> = Arc::new(InMemoryTable::new());

    seed.apply(profiles.as_ref(), hr_records.as_ref(), rules.as_ref())
        .await?;

    let portal = portal_service(profiles, hr_records, rules, config);
    Ok(AppServices { portal })
}
