//! Environment repository trait

use crate::config::DEFAULT_ORDER;
use crate::types::Environment;

use super::error::RepositoryResult;

/// A source of resolved environments
///
/// Implementations:
/// - `SqlEnvironmentRepository`: rows from a `RowStore`
/// - `CompositeEnvironmentRepository`: several repositories combined by order
pub trait EnvironmentRepository: Send + Sync {
    /// Resolve the environment for an application, profile list and label.
    ///
    /// `profile` and `label` fall back to `default` and `master` when absent
    /// or empty.
    fn find_one(
        &self,
        application: &str,
        profile: Option<&str>,
        label: Option<&str>,
    ) -> RepositoryResult<Environment>;

    /// Ranking among composed repositories; lower values contribute first
    fn order(&self) -> i32 {
        DEFAULT_ORDER
    }
}
