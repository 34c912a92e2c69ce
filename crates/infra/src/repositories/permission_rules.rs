use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use staffhub_auth::Role;
use staffhub_directory::{PermissionMatrix, PermissionRule, RuleKey};

use crate::store::{bounded, Filter, RemoteTable, StoreError};

/// Permission rules keyed by (viewer_role, target_department).
pub struct PermissionRuleRepository {
    table: Arc<dyn RemoteTable<RuleKey, PermissionRule>>,
    timeout: Duration,
}

impl PermissionRuleRepository {
    pub fn new(table: Arc<dyn RemoteTable<RuleKey, PermissionRule>>, timeout: Duration) -> Self {
        Self { table, timeout }
    }

    /// The full matrix.
    pub async fn matrix(&self) -> Result<PermissionMatrix, StoreError> {
        let rules = bounded(self.timeout, self.table.fetch_where(&[])).await?;
        Ok(PermissionMatrix::from_rules(rules))
    }

    /// Matrix restricted to rules for the given roles.
    pub async fn matrix_for(&self, roles: &BTreeSet<Role>) -> Result<PermissionMatrix, StoreError> {
        if roles.is_empty() {
            return Ok(PermissionMatrix::new());
        }
        let filters = [Filter::is_in("viewer_role", roles.iter())];
        let rules = bounded(self.timeout, self.table.fetch_where(&filters)).await?;
        Ok(PermissionMatrix::from_rules(rules))
    }

    /// Upsert by composite key. The caller validates and normalises first.
    pub async fn upsert(&self, rule: PermissionRule) -> Result<PermissionRule, StoreError> {
        bounded(self.timeout, self.table.upsert(rule.key(), rule)).await
    }
}
