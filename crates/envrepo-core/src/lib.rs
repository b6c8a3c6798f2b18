//! envrepo Core
//!
//! Layered configuration lookup over a relational properties table.
//! Rows are keyed by application, profile and label; a request for
//! `(application, profiles, label)` is expanded into an ordered list of
//! lookups whose results are combined into one `Environment`.
//!
//! ## Structured values
//!
//! A row whose key ends in `.yml` or `.properties` carries a whole document.
//! The `document` module parses it and flattens nested mappings into dotted
//! keys (`server.port`) before the rows reach the environment.
//!
//! ```rust
//! use std::sync::Arc;
//! use envrepo_core::{EnvironmentRepository, MemoryRowStore, RepositorySettings, SqlEnvironmentRepository};
//!
//! let store = Arc::new(MemoryRowStore::new());
//! store.insert("billing", "prod", "master", "billing.yml", "db:\n  pool: 20\n");
//! store.insert("application", "default", "master", "log.level", "info");
//!
//! let repo = SqlEnvironmentRepository::new(store, RepositorySettings::default());
//! let env = repo.find_one("billing", Some("prod"), None)?;
//!
//! assert_eq!(env.group_names(), vec!["billing-prod", "application-default"]);
//! assert_eq!(env.groups()[0].get("db.pool"), Some("20"));
//! # Ok::<(), envrepo_core::RepositoryError>(())
//! ```

pub mod types;
pub mod document;
pub mod store;
pub mod config;
pub mod resolver;
pub mod logging;

// Re-export commonly used types
pub use types::{ConfigGroup, Environment, LookupKey, RowBatch};

pub use document::{flatten, parse_properties, parse_yaml, DocumentFormat, NestedNode, ParseError};

pub use store::{
    RowStore, QueryParams, StoreError, StoreResult,
    MemoryRowStore, PropertyRow, FnRowStore,
    register_row_store, create_row_store, list_row_stores,
};

pub use config::{RepositorySettings, Grouping, SettingsFile, SettingsError, SettingsResult};

pub use resolver::{
    EnvironmentRepository, SqlEnvironmentRepository, CompositeEnvironmentRepository,
    LookupPlan, RepositoryError, RepositoryResult,
};

pub use logging::{Logger, SharedLogger, NoOpLogger, ConsoleLogger};
