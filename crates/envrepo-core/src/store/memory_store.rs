//! In-memory row store

use parking_lot::RwLock;

use crate::types::{LookupKey, RowBatch};

use super::traits::{QueryParams, RowStore, StoreResult};

/// One row of the properties table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRow {
    pub application: String,
    pub profile: String,
    pub label: String,
    pub key: String,
    pub value: String,
}

impl PropertyRow {
    pub fn new(
        application: impl Into<String>,
        profile: impl Into<String>,
        label: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            application: application.into(),
            profile: profile.into(),
            label: label.into(),
            key: key.into(),
            value: value.into(),
        }
    }

    fn matches(&self, params: &QueryParams<'_>) -> bool {
        self.application == params.application
            && self.profile == params.profile
            && self.label == params.label
    }
}

/// In-memory properties table for testing and embedded use
///
/// The SQL template is ignored; rows are matched on application, profile and
/// label and returned in insertion order. When a key occurs twice for the same
/// triple the later value wins but keeps the earlier position, the same as a
/// result set folded into an ordered map.
///
/// Stores built with `recording()` also keep every (application, profile)
/// pair they were asked for so callers can inspect the lookup order. Plain
/// stores keep no history.
///
/// # Example
///
/// ```
/// use envrepo_core::store::{RowStore, MemoryRowStore, QueryParams};
///
/// let store = MemoryRowStore::new();
/// store.insert("application", "default", "master", "greeting", "hello");
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryRowStore {
    rows: RwLock<Vec<PropertyRow>>,
    history: Option<RwLock<Vec<LookupKey>>>,
}

impl MemoryRowStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that records its query history
    pub fn recording() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            history: Some(RwLock::new(Vec::new())),
        }
    }

    /// Create a store with initial rows
    pub fn with_rows(rows: Vec<PropertyRow>) -> Self {
        Self {
            rows: RwLock::new(rows),
            history: None,
        }
    }

    /// Whether queries are being recorded
    pub fn is_recording(&self) -> bool {
        self.history.is_some()
    }

    /// Append a row
    pub fn insert(&self, application: &str, profile: &str, label: &str, key: &str, value: &str) {
        self.rows
            .write()
            .push(PropertyRow::new(application, profile, label, key, value));
    }

    /// Append a prepared row
    pub fn push(&self, row: PropertyRow) {
        self.rows.write().push(row);
    }

    /// Remove every row for a (application, profile, label) triple
    pub fn remove(&self, application: &str, profile: &str, label: &str) -> usize {
        let params = QueryParams::new(application, profile, label);
        let mut rows = self.rows.write();
        let before = rows.len();
        rows.retain(|row| !row.matches(&params));
        before - rows.len()
    }

    /// Clear all rows and the query history
    pub fn clear(&self) {
        self.rows.write().clear();
        if let Some(history) = &self.history {
            history.write().clear();
        }
    }

    /// Number of rows in the table
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// (application, profile) pairs queried so far, in query order. Always
    /// empty unless the store was built with `recording()`.
    pub fn queries(&self) -> Vec<LookupKey> {
        self.history
            .as_ref()
            .map(|history| history.read().clone())
            .unwrap_or_default()
    }
}

impl RowStore for MemoryRowStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn query(&self, _sql: &str, params: &QueryParams<'_>) -> StoreResult<RowBatch> {
        if let Some(history) = &self.history {
            history
                .write()
                .push(LookupKey::new(params.application, params.profile));
        }

        let rows = self.rows.read();
        let mut batch = RowBatch::new();
        for row in rows.iter().filter(|row| row.matches(params)) {
            batch.insert(row.key.clone(), row.value.clone());
        }
        Ok(batch)
    }
}

impl Clone for MemoryRowStore {
    fn clone(&self) -> Self {
        Self {
            rows: RwLock::new(self.rows.read().clone()),
            history: self.history.as_ref().map(|_| RwLock::new(Vec::new())),
        }
    }
}
