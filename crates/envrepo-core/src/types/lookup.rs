//! Lookup keys and raw row batches

use std::fmt;

use indexmap::IndexMap;

/// Key/value rows returned by a single store query, in store order
pub type RowBatch = IndexMap<String, String>;

/// One (application, profile) pair the resolver queries the store for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey {
    application: String,
    profile: String,
}

impl LookupKey {
    pub fn new(application: impl Into<String>, profile: impl Into<String>) -> Self {
        Self {
            application: application.into(),
            profile: profile.into(),
        }
    }

    /// Application token of this key
    pub fn application(&self) -> &str {
        &self.application
    }

    /// Profile token of this key
    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Name given to config groups produced for this key (`{application}-{profile}`)
    pub fn group_name(&self) -> String {
        format!("{}-{}", self.application, self.profile)
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.application, self.profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_name() {
        let key = LookupKey::new("myapp", "prod");
        assert_eq!(key.application(), "myapp");
        assert_eq!(key.profile(), "prod");
        assert_eq!(key.group_name(), "myapp-prod");
        assert_eq!(key.to_string(), "myapp-prod");
    }
}
