//! Core traits and types for row stores

use std::fmt;

use thiserror::Error;

use crate::types::RowBatch;

/// Positional parameters bound into the SQL template, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryParams<'a> {
    pub application: &'a str,
    pub profile: &'a str,
    pub label: &'a str,
}

impl<'a> QueryParams<'a> {
    pub fn new(application: &'a str, profile: &'a str, label: &'a str) -> Self {
        Self {
            application,
            profile,
            label,
        }
    }

    /// Parameters in binding order
    pub fn as_array(&self) -> [&'a str; 3] {
        [self.application, self.profile, self.label]
    }
}

impl fmt::Display for QueryParams<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.application, self.profile, self.label)
    }
}

/// Errors raised by a row store. Any of these aborts the resolution in progress.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store not available: {0}")]
    NotAvailable(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store error: {0}")]
    Other(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Trait for property row storage
///
/// Implementations can be:
/// - In-memory tables for testing (`MemoryRowStore`)
/// - Database access wrapped in a closure (`FnRowStore`)
/// - Custom implementations holding a connection or pool
///
/// Queries are synchronous and may block on I/O. Timeouts, retries and
/// pooling belong to the implementation.
///
/// # Example
///
/// ```
/// use envrepo_core::store::{RowStore, MemoryRowStore, QueryParams};
///
/// let store = MemoryRowStore::new();
/// store.insert("myapp", "default", "master", "server.port", "8080");
///
/// let rows = store.query("SELECT ...", &QueryParams::new("myapp", "default", "master")).unwrap();
/// assert_eq!(rows["server.port"], "8080");
/// ```
pub trait RowStore: Send + Sync {
    /// Human-readable name of this store
    fn name(&self) -> &str;

    /// Run `sql` with `params` bound positionally and return the key/value rows
    ///
    /// Rows keep the order the store returned them in. An empty batch means no
    /// rows matched.
    fn query(&self, sql: &str, params: &QueryParams<'_>) -> StoreResult<RowBatch>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params() {
        let params = QueryParams::new("myapp", "prod", "master");
        assert_eq!(params.as_array(), ["myapp", "prod", "master"]);
        assert_eq!(params.to_string(), "[myapp, prod, master]");
    }
}
