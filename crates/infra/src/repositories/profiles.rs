use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use staffhub_auth::ClinicLocation;
use staffhub_core::{Entity, StaffId};
use staffhub_directory::{Department, StaffProfile};

use crate::store::{bounded, Filter, RemoteTable, StoreError};

pub struct ProfileRepository {
    table: Arc<dyn RemoteTable<StaffId, StaffProfile>>,
    timeout: Duration,
}

impl ProfileRepository {
    pub fn new(table: Arc<dyn RemoteTable<StaffId, StaffProfile>>, timeout: Duration) -> Self {
        Self { table, timeout }
    }

    pub async fn get(&self, id: StaffId) -> Result<StaffProfile, StoreError> {
        bounded(self.timeout, self.table.fetch_one(&id)).await
    }

    /// Candidate rows for a directory listing, sorted by name.
    ///
    /// Narrows by department and, when given, by clinic location. The
    /// evaluator still runs over the result; this only trims the round trip.
    pub async fn candidates(
        &self,
        departments: &BTreeSet<Department>,
        locations: Option<&BTreeSet<ClinicLocation>>,
    ) -> Result<Vec<StaffProfile>, StoreError> {
        if departments.is_empty() {
            return Ok(Vec::new());
        }

        let mut filters = vec![Filter::is_in("department", departments.iter())];
        if let Some(locations) = locations {
            filters.push(Filter::is_in("clinic_locations", locations.iter()));
        }

        let mut rows = bounded(self.timeout, self.table.fetch_where(&filters)).await?;
        sort_by_name(&mut rows);
        Ok(rows)
    }

    /// Every profile, sorted by name.
    pub async fn all(&self) -> Result<Vec<StaffProfile>, StoreError> {
        let mut rows = bounded(self.timeout, self.table.fetch_where(&[])).await?;
        sort_by_name(&mut rows);
        Ok(rows)
    }

    pub async fn save(&self, profile: StaffProfile) -> Result<StaffProfile, StoreError> {
        let id = *profile.id();
        bounded(self.timeout, self.table.upsert(id, profile)).await
    }
}

pub(crate) fn sort_by_name(rows: &mut [StaffProfile]) {
    rows.sort_by(|a, b| a.full_name.cmp(&b.full_name).then_with(|| a.id.cmp(&b.id)));
}
