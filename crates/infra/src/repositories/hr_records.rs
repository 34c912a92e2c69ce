use std::sync::Arc;
use std::time::Duration;

use staffhub_core::{Entity, StaffId};
use staffhub_directory::HrRecord;

use crate::store::{bounded, RemoteTable, StoreError};

/// HR records table. Callers must authorize before touching it.
pub struct HrRecordRepository {
    table: Arc<dyn RemoteTable<StaffId, HrRecord>>,
    timeout: Duration,
}

impl HrRecordRepository {
    pub fn new(table: Arc<dyn RemoteTable<StaffId, HrRecord>>, timeout: Duration) -> Self {
        Self { table, timeout }
    }

    pub async fn get(&self, staff_id: StaffId) -> Result<HrRecord, StoreError> {
        bounded(self.timeout, self.table.fetch_one(&staff_id)).await
    }

    pub async fn save(&self, record: HrRecord) -> Result<HrRecord, StoreError> {
        let id = *record.id();
        bounded(self.timeout, self.table.upsert(id, record)).await
    }
}
