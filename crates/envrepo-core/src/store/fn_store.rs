//! Closure-backed row store

use std::fmt;

use crate::types::RowBatch;

use super::traits::{QueryParams, RowStore, StoreResult};

type QueryFn = dyn Fn(&str, &QueryParams<'_>) -> StoreResult<RowBatch> + Send + Sync;

/// A row store that delegates every query to a closure
///
/// This is the seam for real database access: the closure binds the
/// parameters into its prepared statement, runs it and folds the first two
/// columns of each row into the batch.
///
/// # Example
///
/// ```
/// use envrepo_core::store::{FnRowStore, RowStore, QueryParams};
/// use envrepo_core::types::RowBatch;
///
/// let store = FnRowStore::new("fixed", |_sql, params| {
///     let mut rows = RowBatch::new();
///     rows.insert("queried.application".to_string(), params.application.to_string());
///     Ok(rows)
/// });
/// let rows = store.query("SELECT 1", &QueryParams::new("myapp", "default", "master")).unwrap();
/// assert_eq!(rows["queried.application"], "myapp");
/// ```
pub struct FnRowStore {
    name: String,
    query: Box<QueryFn>,
}

impl FnRowStore {
    pub fn new<F>(name: impl Into<String>, query: F) -> Self
    where
        F: Fn(&str, &QueryParams<'_>) -> StoreResult<RowBatch> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            query: Box::new(query),
        }
    }
}

impl RowStore for FnRowStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn query(&self, sql: &str, params: &QueryParams<'_>) -> StoreResult<RowBatch> {
        (self.query)(sql, params)
    }
}

// Implement Debug manually since the boxed closure doesn't implement Debug
impl fmt::Debug for FnRowStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRowStore").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    #[test]
    fn test_sql_and_params_forwarded() {
        let store = FnRowStore::new("echo", |sql, params| {
            let mut rows = RowBatch::new();
            rows.insert("sql".to_string(), sql.to_string());
            rows.insert("params".to_string(), params.to_string());
            Ok(rows)
        });

        let rows = store
            .query("SELECT KEY, VALUE", &QueryParams::new("a", "p", "l"))
            .unwrap();
        assert_eq!(store.name(), "echo");
        assert_eq!(rows["sql"], "SELECT KEY, VALUE");
        assert_eq!(rows["params"], "[a, p, l]");
    }

    #[test]
    fn test_errors_propagate() {
        let store = FnRowStore::new("down", |_, _| Err(StoreError::NotAvailable("db".into())));
        let err = store.query("", &QueryParams::new("a", "p", "l")).unwrap_err();
        assert!(matches!(err, StoreError::NotAvailable(_)));
    }
}
