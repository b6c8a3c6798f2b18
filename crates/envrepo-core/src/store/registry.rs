//! Row store registry for creating stores by name

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use super::memory_store::MemoryRowStore;
use super::traits::RowStore;

/// Factory function type for creating row stores
pub type StoreFactory = Box<dyn Fn() -> Arc<dyn RowStore> + Send + Sync>;

/// Definition of a registered row store
pub struct StoreDefinition {
    /// Unique name for this store
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Factory function to create instances
    pub factory: StoreFactory,
}

impl std::fmt::Debug for StoreDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

/// Table behind the built-in `memory` store
static SHARED_MEMORY_STORE: Lazy<Arc<MemoryRowStore>> = Lazy::new(|| Arc::new(MemoryRowStore::new()));

/// The process-wide table handed out for the built-in `memory` store
///
/// Rows inserted here are visible to every repository created from settings
/// naming the `memory` store.
pub fn shared_memory_store() -> Arc<MemoryRowStore> {
    SHARED_MEMORY_STORE.clone()
}

/// Global registry of row stores
static REGISTRY: Lazy<RwLock<HashMap<String, StoreDefinition>>> = Lazy::new(|| {
    let mut map = HashMap::new();

    map.insert(
        "memory".to_string(),
        StoreDefinition {
            name: "memory".to_string(),
            description: "Shared in-memory properties table".to_string(),
            factory: Box::new(|| -> Arc<dyn RowStore> { shared_memory_store() }),
        },
    );

    RwLock::new(map)
});

/// Register a row store type, replacing any store with the same name
///
/// Applications register their database-backed store at startup so settings
/// can refer to it by name.
///
/// # Example
///
/// ```
/// use envrepo_core::store::{register_row_store, create_row_store, MemoryRowStore};
/// use std::sync::Arc;
///
/// register_row_store(
///     "fixtures",
///     "Fixture rows for tests",
///     Box::new(|| Arc::new(MemoryRowStore::new())),
/// );
/// assert!(create_row_store("fixtures").is_some());
/// ```
pub fn register_row_store(name: &str, description: &str, factory: StoreFactory) {
    REGISTRY.write().insert(
        name.to_string(),
        StoreDefinition {
            name: name.to_string(),
            description: description.to_string(),
            factory,
        },
    );
}

/// Create a row store by name, or `None` if the name is not registered
pub fn create_row_store(name: &str) -> Option<Arc<dyn RowStore>> {
    REGISTRY.read().get(name).map(|def| (def.factory)())
}

/// List registered stores as (name, description) pairs, sorted by name
pub fn list_row_stores() -> Vec<(String, String)> {
    let mut stores: Vec<_> = REGISTRY
        .read()
        .values()
        .map(|def| (def.name.clone(), def.description.clone()))
        .collect();
    stores.sort();
    stores
}

/// Check if a store is registered
pub fn has_row_store(name: &str) -> bool {
    REGISTRY.read().contains_key(name)
}

/// Unregister a row store (mainly for testing)
pub fn unregister_row_store(name: &str) -> bool {
    REGISTRY.write().remove(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FnRowStore, QueryParams};
    use crate::types::RowBatch;

    #[test]
    fn test_builtin_memory_store() {
        assert!(has_row_store("memory"));
        let store = create_row_store("memory").unwrap();
        assert_eq!(store.name(), "memory");
    }

    #[test]
    fn test_memory_store_is_shared() {
        shared_memory_store().insert("registry-shared", "default", "master", "k", "v");

        let first = create_row_store("memory").unwrap();
        let second = create_row_store("memory").unwrap();
        let params = QueryParams::new("registry-shared", "default", "master");
        assert_eq!(first.query("", &params).unwrap().get("k").map(String::as_str), Some("v"));
        assert_eq!(second.query("", &params).unwrap().len(), 1);

        shared_memory_store().remove("registry-shared", "default", "master");
        assert!(first.query("", &params).unwrap().is_empty());
    }

    #[test]
    fn test_create_unknown_store() {
        assert!(create_row_store("nonexistent_xyz").is_none());
    }

    #[test]
    fn test_register_custom_store() {
        register_row_store(
            "test_custom_row_store",
            "A test store",
            Box::new(|| Arc::new(FnRowStore::new("custom", |_, _| Ok(RowBatch::new())))),
        );

        assert!(has_row_store("test_custom_row_store"));
        let names: Vec<_> = list_row_stores().into_iter().map(|(n, _)| n).collect();
        assert!(names.contains(&"test_custom_row_store".to_string()));
        assert!(names.contains(&"memory".to_string()));

        let store = create_row_store("test_custom_row_store").unwrap();
        assert_eq!(store.name(), "custom");

        assert!(unregister_row_store("test_custom_row_store"));
        assert!(!has_row_store("test_custom_row_store"));
    }
}
