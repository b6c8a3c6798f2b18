//! Store-backed environment repository
//!
//! Each (application, profile) lookup returns a batch of key/value rows. Rows
//! whose key names a document (`*.yml`, `*.properties`) are parsed and
//! flattened; other rows are used verbatim. How rows become config groups is
//! controlled by `Grouping`:
//! - `PerRow`: every row appends a group named `{application}-{profile}`.
//!   Document rows append their parsed content; plain rows append the whole
//!   raw batch, so a batch of N plain rows yields N identical groups.
//! - `PerBatch`: every non-empty batch appends one group holding the plain rows
//!   with each parsed document merged in where its row appeared.
//!
//! A document that fails to parse is logged and skipped; the rest of the batch
//! and later lookups are unaffected. Store failures abort the lookup.

use std::sync::Arc;

use crate::config::{Grouping, RepositorySettings};
use crate::debug_log;
use crate::document::{flatten, parse_properties, parse_yaml, DocumentFormat, ParseError};
use crate::{log_debug, log_warn};
use crate::logging::{NoOpLogger, SharedLogger};
use crate::store::{create_row_store, QueryParams, RowStore};
use crate::types::{ConfigGroup, Environment, LookupKey, RowBatch};

use super::error::{RepositoryError, RepositoryResult};
use super::keys::LookupPlan;
use super::repository::EnvironmentRepository;

/// Environment repository reading a properties table through a `RowStore`
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use envrepo_core::config::RepositorySettings;
/// use envrepo_core::resolver::{EnvironmentRepository, SqlEnvironmentRepository};
/// use envrepo_core::store::MemoryRowStore;
///
/// let store = Arc::new(MemoryRowStore::new());
/// store.insert("myapp", "prod", "master", "server.port", "8443");
/// store.insert("application", "default", "master", "server.port", "8080");
///
/// let repo = SqlEnvironmentRepository::new(store, RepositorySettings::default());
/// let env = repo.find_one("myapp", Some("prod"), None).unwrap();
/// assert_eq!(env.group_names(), vec!["myapp-prod", "application-default"]);
/// ```
pub struct SqlEnvironmentRepository {
    store: Arc<dyn RowStore>,
    sql: String,
    order: i32,
    yaml_extension: bool,
    grouping: Grouping,
    logger: SharedLogger,
}

impl SqlEnvironmentRepository {
    /// Create a repository over an explicit store
    pub fn new(store: Arc<dyn RowStore>, settings: RepositorySettings) -> Self {
        Self {
            store,
            sql: settings.sql,
            order: settings.order,
            yaml_extension: settings.yaml_extension,
            grouping: settings.grouping,
            logger: Arc::new(NoOpLogger::new()),
        }
    }

    /// Create a repository over the registered store named in the settings
    ///
    /// The default `memory` store is the process-wide table returned by
    /// `shared_memory_store()`; it stays empty until rows are inserted there.
    pub fn from_settings(settings: RepositorySettings) -> RepositoryResult<Self> {
        let store = create_row_store(&settings.store).ok_or_else(|| {
            RepositoryError::configuration(format!("unknown row store: {}", settings.store))
        })?;
        Ok(Self::new(store, settings))
    }

    /// Report skipped documents through `logger`
    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn set_sql(&mut self, sql: impl Into<String>) {
        self.sql = sql.into();
    }

    pub fn set_order(&mut self, order: i32) {
        self.order = order;
    }

    pub fn grouping(&self) -> Grouping {
        self.grouping
    }

    pub fn store(&self) -> &Arc<dyn RowStore> {
        &self.store
    }

    fn query(&self, key: &LookupKey, label: &str) -> RepositoryResult<RowBatch> {
        let params = QueryParams::new(key.application(), key.profile(), label);
        debug_log!("querying {} with {}", self.store.name(), params);
        log_debug!(self.logger, "Querying {} with {}", self.store.name(), params);
        Ok(self.store.query(&self.sql, &params)?)
    }

    /// Parse one document row, or `None` if it is malformed
    fn parse_document(
        &self,
        format: DocumentFormat,
        group: &str,
        row_key: &str,
        text: &str,
    ) -> Option<RowBatch> {
        let parsed: Result<RowBatch, ParseError> = match format {
            DocumentFormat::Yaml => parse_yaml(text).map(|node| flatten(&node)),
            DocumentFormat::Properties => parse_properties(text),
            DocumentFormat::Plain => return None,
        };
        match parsed {
            Ok(rows) => Some(rows),
            Err(err) => {
                log_warn!(
                    self.logger,
                    "Skipping {} document {} in {}: {}",
                    format.as_str(),
                    row_key,
                    group,
                    err
                );
                None
            }
        }
    }

    fn groups_per_row(&self, name: &str, batch: &RowBatch) -> Vec<ConfigGroup> {
        let mut groups = Vec::new();
        for (key, value) in batch {
            match DocumentFormat::detect(key, self.yaml_extension) {
                DocumentFormat::Plain => groups.push(ConfigGroup::new(name, batch.clone())),
                format => {
                    if let Some(rows) = self.parse_document(format, name, key, value) {
                        groups.push(ConfigGroup::new(name, rows));
                    }
                }
            }
        }
        groups
    }

    fn group_per_batch(&self, name: &str, batch: &RowBatch) -> Option<ConfigGroup> {
        let mut merged = RowBatch::new();
        for (key, value) in batch {
            match DocumentFormat::detect(key, self.yaml_extension) {
                DocumentFormat::Plain => {
                    merged.insert(key.clone(), value.clone());
                }
                format => {
                    if let Some(rows) = self.parse_document(format, name, key, value) {
                        merged.extend(rows);
                    }
                }
            }
        }
        // every row was a document that failed to parse
        if merged.is_empty() {
            return None;
        }
        Some(ConfigGroup::new(name, merged))
    }
}

impl EnvironmentRepository for SqlEnvironmentRepository {
    fn find_one(
        &self,
        application: &str,
        profile: Option<&str>,
        label: Option<&str>,
    ) -> RepositoryResult<Environment> {
        let plan = LookupPlan::new(application, profile, label)?;
        let mut environment = Environment::new(application, plan.profiles().to_vec(), plan.label());

        for key in plan.keys() {
            let batch = self.query(&key, plan.label())?;
            if batch.is_empty() {
                continue;
            }

            let name = key.group_name();
            match self.grouping {
                Grouping::PerRow => environment.add_all(self.groups_per_row(&name, &batch)),
                Grouping::PerBatch => {
                    if let Some(group) = self.group_per_batch(&name, &batch) {
                        environment.add(group);
                    }
                }
            }
        }

        Ok(environment)
    }

    fn order(&self) -> i32 {
        self.order
    }
}

impl std::fmt::Debug for SqlEnvironmentRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlEnvironmentRepository")
            .field("store", &self.store.name())
            .field("sql", &self.sql)
            .field("order", &self.order)
            .field("yaml_extension", &self.yaml_extension)
            .field("grouping", &self.grouping)
            .finish()
    }
}
