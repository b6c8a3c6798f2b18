//! Environment resolution
//!
//! Turns an (application, profile, label) request into an ordered list of
//! store lookups and folds the returned rows into an `Environment`.

mod error;
mod keys;
mod repository;
mod sql_repository;
mod composite;

pub use error::{RepositoryError, RepositoryResult};
pub use keys::{
    LookupPlan, normalize_application, normalize_label, normalize_profile, split_tokens,
    dedup_tokens, BASE_APPLICATION, DEFAULT_LABEL, DEFAULT_PROFILE,
};
pub use repository::EnvironmentRepository;
pub use sql_repository::SqlEnvironmentRepository;
pub use composite::CompositeEnvironmentRepository;
