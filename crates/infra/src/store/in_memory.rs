use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde::Serialize;

use super::{Filter, RemoteTable, StoreError};

/// In-memory table for tests/dev.
///
/// Rows are kept ordered by key. Not optimized for performance: filtered
/// fetches serialize every row.
#[derive(Debug)]
pub struct InMemoryTable<K, V> {
    rows: RwLock<BTreeMap<K, V>>,
}

impl<K: Ord, V> InMemoryTable<K, V> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.read().map(|rows| rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: Ord, V> Default for InMemoryTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

#[async_trait]
impl<K, V> RemoteTable<K, V> for InMemoryTable<K, V>
where
    K: Ord + Clone + Send + Sync + 'static,
    V: Serialize + Clone + Send + Sync + 'static,
{
    async fn fetch_one(&self, key: &K) -> Result<V, StoreError> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        rows.get(key).cloned().ok_or(StoreError::NotFound)
    }

    async fn fetch_where(&self, filters: &[Filter]) -> Result<Vec<V>, StoreError> {
        let rows = self.rows.read().map_err(|_| poisoned())?;

        let mut matched = Vec::new();
        for row in rows.values() {
            if filters.is_empty() {
                matched.push(row.clone());
                continue;
            }
            let json = serde_json::to_value(row).map_err(|e| StoreError::Rejected(e.to_string()))?;
            if filters.iter().all(|f| f.matches(&json)) {
                matched.push(row.clone());
            }
        }
        Ok(matched)
    }

    async fn upsert(&self, key: K, value: V) -> Result<V, StoreError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        rows.insert(key, value.clone());
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Row {
        name: &'static str,
        team: &'static str,
        sites: Vec<&'static str>,
    }

    fn row(name: &'static str, team: &'static str, sites: &[&'static str]) -> Row {
        Row {
            name,
            team,
            sites: sites.to_vec(),
        }
    }

    #[tokio::test]
    async fn fetch_one_distinguishes_missing_rows() {
        let table = InMemoryTable::new();
        table.upsert(1u32, row("a", "x", &[])).await.unwrap();

        assert_eq!(table.fetch_one(&1).await.unwrap().name, "a");
        assert_eq!(table.fetch_one(&2).await, Err(StoreError::NotFound));
    }

    #[tokio::test]
    async fn upsert_overwrites_by_key() {
        let table = InMemoryTable::new();
        table.upsert(1u32, row("a", "x", &[])).await.unwrap();
        table.upsert(1u32, row("b", "y", &[])).await.unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.fetch_one(&1).await.unwrap().name, "b");
    }

    #[tokio::test]
    async fn fetch_where_applies_all_filters() {
        let table = InMemoryTable::new();
        table.upsert(1u32, row("a", "clinical", &["Burnaby"])).await.unwrap();
        table.upsert(2u32, row("b", "clinical", &["Richmond"])).await.unwrap();
        table.upsert(3u32, row("c", "finance", &["Burnaby"])).await.unwrap();

        let all = table.fetch_where(&[]).await.unwrap();
        assert_eq!(all.len(), 3);

        let hits = table
            .fetch_where(&[
                Filter::eq("team", "clinical"),
                Filter::is_in("sites", ["Burnaby", "Surrey"]),
            ])
            .await
            .unwrap();
        assert_eq!(hits, vec![row("a", "clinical", &["Burnaby"])]);
    }
}
