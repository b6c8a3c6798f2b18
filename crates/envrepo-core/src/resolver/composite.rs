//! Composite environment repository

use std::sync::Arc;

use crate::config::DEFAULT_ORDER;
use crate::types::Environment;

use super::error::RepositoryResult;
use super::keys::LookupPlan;
use super::repository::EnvironmentRepository;

/// Combines several repositories into one
///
/// Delegates are sorted by ascending `order()` (ties keep insertion order).
/// `find_one` asks each delegate in turn and appends all of its groups, so
/// groups from lower-ordered repositories come first. A failing delegate
/// fails the whole lookup.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use envrepo_core::config::RepositorySettings;
/// use envrepo_core::resolver::{
///     CompositeEnvironmentRepository, EnvironmentRepository, SqlEnvironmentRepository,
/// };
/// use envrepo_core::store::MemoryRowStore;
///
/// let primary = Arc::new(MemoryRowStore::new());
/// primary.insert("myapp", "default", "master", "source", "primary");
/// let fallback = Arc::new(MemoryRowStore::new());
/// fallback.insert("myapp", "default", "master", "source", "fallback");
///
/// let second: Arc<dyn EnvironmentRepository> = Arc::new(SqlEnvironmentRepository::new(
///     fallback,
///     RepositorySettings::default().with_order(2),
/// ));
/// let first: Arc<dyn EnvironmentRepository> = Arc::new(SqlEnvironmentRepository::new(
///     primary,
///     RepositorySettings::default().with_order(1),
/// ));
/// let composite = CompositeEnvironmentRepository::new(vec![second, first]);
///
/// let env = composite.find_one("myapp", None, None).unwrap();
/// assert_eq!(env.groups()[0].get("source"), Some("primary"));
/// ```
pub struct CompositeEnvironmentRepository {
    repositories: Vec<Arc<dyn EnvironmentRepository>>,
}

impl CompositeEnvironmentRepository {
    pub fn new(mut repositories: Vec<Arc<dyn EnvironmentRepository>>) -> Self {
        repositories.sort_by_key(|repo| repo.order());
        Self { repositories }
    }

    /// Delegates in consultation order
    pub fn repositories(&self) -> &[Arc<dyn EnvironmentRepository>] {
        &self.repositories
    }

    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }
}

impl EnvironmentRepository for CompositeEnvironmentRepository {
    fn find_one(
        &self,
        application: &str,
        profile: Option<&str>,
        label: Option<&str>,
    ) -> RepositoryResult<Environment> {
        let plan = LookupPlan::new(application, profile, label)?;
        let mut environment = Environment::new(application, plan.profiles().to_vec(), plan.label());

        for repository in &self.repositories {
            let found = repository.find_one(application, profile, label)?;
            environment.add_all(found.property_sources);
        }

        Ok(environment)
    }

    /// The lowest delegate order, so a composite ranks like its first member
    fn order(&self) -> i32 {
        self.repositories
            .first()
            .map(|repo| repo.order())
            .unwrap_or(DEFAULT_ORDER)
    }
}

// Implement Debug manually since Arc<dyn EnvironmentRepository> doesn't implement Debug
impl std::fmt::Debug for CompositeEnvironmentRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeEnvironmentRepository")
            .field("repositories", &format!("[{} repositories]", self.repositories.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RepositorySettings;
    use crate::resolver::{RepositoryError, SqlEnvironmentRepository};
    use crate::store::{FnRowStore, MemoryRowStore, StoreError};

    fn sql_repo(store: Arc<MemoryRowStore>, order: i32) -> Arc<dyn EnvironmentRepository> {
        Arc::new(SqlEnvironmentRepository::new(
            store,
            RepositorySettings::default().with_order(order),
        ))
    }

    fn store_with(value: &str) -> Arc<MemoryRowStore> {
        let store = Arc::new(MemoryRowStore::new());
        store.insert("myapp", "default", "master", "who", value);
        store
    }

    #[test]
    fn test_sorted_by_order() {
        let composite = CompositeEnvironmentRepository::new(vec![
            sql_repo(store_with("c"), 30),
            sql_repo(store_with("a"), 10),
            sql_repo(store_with("b"), 20),
        ]);

        assert_eq!(composite.len(), 3);
        assert_eq!(composite.order(), 10);
        let orders: Vec<_> = composite.repositories().iter().map(|r| r.order()).collect();
        assert_eq!(orders, vec![10, 20, 30]);

        let env = composite.find_one("myapp", None, None).unwrap();
        let who: Vec<_> = env.groups().iter().map(|g| g.get("who").unwrap()).collect();
        assert_eq!(who, vec!["a", "b", "c"]);
        assert_eq!(env.group_names(), vec!["myapp-default"; 3]);
    }

    #[test]
    fn test_header_is_normalized() {
        let composite = CompositeEnvironmentRepository::new(vec![sql_repo(store_with("x"), 0)]);
        let env = composite.find_one("myapp", Some("prod"), Some("")).unwrap();

        assert_eq!(env.name, "myapp");
        assert_eq!(env.label, "master");
        assert_eq!(env.profiles, vec!["default", "prod"]);
    }

    #[test]
    fn test_empty_composite() {
        let composite = CompositeEnvironmentRepository::new(Vec::new());
        assert!(composite.is_empty());
        assert_eq!(composite.order(), DEFAULT_ORDER);
        assert!(composite.find_one("myapp", None, None).unwrap().is_empty());
    }

    #[test]
    fn test_delegate_failure_aborts() {
        let failing: Arc<dyn EnvironmentRepository> = Arc::new(SqlEnvironmentRepository::new(
            Arc::new(FnRowStore::new("down", |_, _| {
                Err(StoreError::NotAvailable("connection refused".into()))
            })),
            RepositorySettings::default().with_order(5),
        ));
        let composite = CompositeEnvironmentRepository::new(vec![sql_repo(store_with("ok"), 1), failing]);

        assert!(matches!(
            composite.find_one("myapp", None, None),
            Err(RepositoryError::Store(StoreError::NotAvailable(_)))
        ));
    }
}
