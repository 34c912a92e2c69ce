//! Remote tabular store abstraction.
//!
//! The portal needs exactly these shapes from its backing store:
//!
//! - keyed single-row fetch ([`RemoteTable::fetch_one`])
//! - filtered multi-row fetch with equality and set-membership predicates
//!   ([`RemoteTable::fetch_where`] + [`Filter`])
//! - upsert by (composite) key ([`RemoteTable::upsert`])
//!
//! Rows are matched against filters through their JSON representation, so a
//! backend speaking any protocol can implement the trait.

pub mod in_memory;

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

pub use in_memory::InMemoryTable;

/// Store operation error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Keyed fetch matched no row.
    #[error("row not found")]
    NotFound,

    /// The call did not complete within the configured limit.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Network or backend failure; the caller may try again later.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store refused the write (constraint, malformed row).
    #[error("store rejected the request: {0}")]
    Rejected(String),
}

/// Row predicate.
///
/// Array-valued columns (e.g. `clinic_locations`) match when any element
/// satisfies the predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Eq { column: String, value: JsonValue },
    In { column: String, values: Vec<JsonValue> },
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Serialize) -> Self {
        Filter::Eq {
            column: column.into(),
            value: serde_json::to_value(value).unwrap_or(JsonValue::Null),
        }
    }

    pub fn is_in<T: Serialize>(column: impl Into<String>, values: impl IntoIterator<Item = T>) -> Self {
        Filter::In {
            column: column.into(),
            values: values
                .into_iter()
                .filter_map(|v| serde_json::to_value(v).ok())
                .collect(),
        }
    }

    pub fn column(&self) -> &str {
        match self {
            Filter::Eq { column, .. } | Filter::In { column, .. } => column,
        }
    }

    /// Evaluate against a row's JSON object. Missing columns never match.
    pub fn matches(&self, row: &JsonValue) -> bool {
        let Some(cell) = row.get(self.column()) else {
            return false;
        };

        let hit = |candidate: &JsonValue| match self {
            Filter::Eq { value, .. } => candidate == value,
            Filter::In { values, .. } => values.contains(candidate),
        };

        match cell {
            JsonValue::Array(items) => items.iter().any(hit),
            scalar => hit(scalar),
        }
    }
}

/// Keyed table in a remote store.
#[async_trait]
pub trait RemoteTable<K, V>: Send + Sync
where
    K: Send + Sync,
    V: Send,
{
    async fn fetch_one(&self, key: &K) -> Result<V, StoreError>;

    /// All rows matching every filter (an empty slice returns the whole table).
    async fn fetch_where(&self, filters: &[Filter]) -> Result<Vec<V>, StoreError>;

    /// Insert or overwrite the row at `key`; returns the stored row.
    async fn upsert(&self, key: K, value: V) -> Result<V, StoreError>;
}

/// Bound a store call by `limit`.
pub async fn bounded<T, F>(limit: Duration, call: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout(limit)),
    }
}
