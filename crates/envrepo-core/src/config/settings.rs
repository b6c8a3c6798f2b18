//! Repository settings and their environment overrides

use std::env;

use serde::{Deserialize, Serialize};

use super::error::{SettingsError, SettingsResult};

/// Query run once per (application, profile) pair. Parameters bind in the
/// order application, profile, label.
pub const DEFAULT_SQL: &str =
    "SELECT KEY, VALUE from PROPERTIES where APPLICATION=? and PROFILE=? and LABEL=?";

/// Default ranking among composed repositories (lower ranks first)
pub const DEFAULT_ORDER: i32 = i32::MAX - 10;

/// Registered row store used when none is configured
pub const DEFAULT_STORE: &str = "memory";

/// How rows of one batch turn into config groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grouping {
    /// Every row appends its own group: structured rows append their parsed
    /// document, plain rows append the whole raw batch.
    #[default]
    PerRow,
    /// Each batch appends exactly one group: plain rows in store order with
    /// parsed documents merged in at the position of their row.
    PerBatch,
}

impl Grouping {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "per_row" | "row" => Some(Grouping::PerRow),
            "per_batch" | "batch" => Some(Grouping::PerBatch),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grouping::PerRow => "per_row",
            Grouping::PerBatch => "per_batch",
        }
    }
}

/// Settings for a store-backed environment repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositorySettings {
    /// Parameterized lookup query
    pub sql: String,
    /// Ranking used when several repositories are composed
    pub order: i32,
    /// Name of the registered row store
    pub store: String,
    /// Treat `.yaml` keys as YAML documents in addition to `.yml`
    pub yaml_extension: bool,
    /// Row to group mapping
    pub grouping: Grouping,
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            sql: DEFAULT_SQL.to_string(),
            order: DEFAULT_ORDER,
            store: DEFAULT_STORE.to_string(),
            yaml_extension: false,
            grouping: Grouping::PerRow,
        }
    }
}

impl RepositorySettings {
    pub const ENV_SQL: &'static str = "ENVREPO_SQL";
    pub const ENV_ORDER: &'static str = "ENVREPO_ORDER";
    pub const ENV_STORE: &'static str = "ENVREPO_STORE";
    pub const ENV_YAML_EXTENSION: &'static str = "ENVREPO_YAML_EXTENSION";
    pub const ENV_GROUPING: &'static str = "ENVREPO_GROUPING";

    /// Set the SQL template
    pub fn with_sql(mut self, sql: impl Into<String>) -> Self {
        self.sql = sql.into();
        self
    }

    /// Set the order
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Set the store name
    pub fn with_store(mut self, store: impl Into<String>) -> Self {
        self.store = store.into();
        self
    }

    /// Accept `.yaml` keys as YAML documents
    pub fn with_yaml_extension(mut self, enabled: bool) -> Self {
        self.yaml_extension = enabled;
        self
    }

    /// Set the grouping mode
    pub fn with_grouping(mut self, grouping: Grouping) -> Self {
        self.grouping = grouping;
        self
    }

    /// Apply `ENVREPO_*` overrides from the process environment
    pub fn apply_env(&mut self) -> SettingsResult<()> {
        self.apply_overrides(|name| env::var(name).ok())
    }

    /// Apply overrides from a variable lookup. Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> SettingsResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(sql) = get(Self::ENV_SQL) {
            self.sql = sql;
        }
        if let Some(order) = get(Self::ENV_ORDER) {
            self.order = order
                .trim()
                .parse()
                .map_err(|_| SettingsError::invalid(Self::ENV_ORDER, order.as_str()))?;
        }
        if let Some(store) = get(Self::ENV_STORE) {
            self.store = store.trim().to_string();
        }
        if let Some(flag) = get(Self::ENV_YAML_EXTENSION) {
            self.yaml_extension = match flag.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => return Err(SettingsError::invalid(Self::ENV_YAML_EXTENSION, flag.as_str())),
            };
        }
        if let Some(grouping) = get(Self::ENV_GROUPING) {
            self.grouping = Grouping::parse(&grouping)
                .ok_or_else(|| SettingsError::invalid(Self::ENV_GROUPING, grouping.as_str()))?;
        }
        Ok(())
    }
}
