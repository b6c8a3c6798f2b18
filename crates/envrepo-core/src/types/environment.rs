//! Resolved environment types

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A named, ordered set of properties contributed by one lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigGroup {
    /// Group name, `{application}-{profile}` for store-backed groups
    pub name: String,
    /// Property key/value pairs in contribution order
    pub source: IndexMap<String, String>,
}

impl ConfigGroup {
    /// Create a new config group
    pub fn new(name: impl Into<String>, source: IndexMap<String, String>) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }

    /// Look up a property in this group
    pub fn get(&self, key: &str) -> Option<&str> {
        self.source.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }
}

/// The resolved configuration for one (application, profile, label) request
///
/// Groups are kept in the order they were produced. Consumers decide how
/// ordering maps to override precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    /// Application name as requested
    pub name: String,
    /// Profiles after the `default` profile has been prepended
    pub profiles: Vec<String>,
    /// Label the lookups were made with
    pub label: String,
    /// Version of the backing data, when the repository knows it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Free-form repository state, when the repository knows it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Contributed config groups in production order
    #[serde(default)]
    pub property_sources: Vec<ConfigGroup>,
}

impl Environment {
    /// Create an empty environment
    pub fn new(name: impl Into<String>, profiles: Vec<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            profiles,
            label: label.into(),
            version: None,
            state: None,
            property_sources: Vec::new(),
        }
    }

    /// Set the version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the state
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Append a group after all existing ones
    pub fn add(&mut self, group: ConfigGroup) {
        self.property_sources.push(group);
    }

    /// Insert a group before all existing ones
    pub fn add_first(&mut self, group: ConfigGroup) {
        self.property_sources.insert(0, group);
    }

    /// Append several groups, keeping their order
    pub fn add_all(&mut self, groups: impl IntoIterator<Item = ConfigGroup>) {
        self.property_sources.extend(groups);
    }

    /// Groups in production order
    pub fn groups(&self) -> &[ConfigGroup] {
        &self.property_sources
    }

    /// Names of the groups in production order
    pub fn group_names(&self) -> Vec<&str> {
        self.property_sources.iter().map(|g| g.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.property_sources.is_empty()
    }

    /// Serialize to pretty JSON for handing to a transport layer
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn group(name: &str, pairs: &[(&str, &str)]) -> ConfigGroup {
        let source = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ConfigGroup::new(name, source)
    }

    #[test]
    fn test_add_and_add_first() {
        let mut env = Environment::new("myapp", vec!["default".to_string()], "master");
        assert!(env.is_empty());

        env.add(group("myapp-default", &[("a", "1")]));
        env.add_first(group("application-default", &[("a", "0")]));
        env.add_all(vec![group("x", &[]), group("y", &[])]);

        assert_eq!(
            env.group_names(),
            vec!["application-default", "myapp-default", "x", "y"]
        );
        assert_eq!(env.groups()[1].get("a"), Some("1"));
    }

    #[test]
    fn test_json_shape() {
        let mut env = Environment::new("myapp", vec!["default".to_string(), "prod".to_string()], "master")
            .with_version("v1");
        env.add(group("myapp-prod", &[("server.port", "8080"), ("a", "b")]));

        let value: serde_json::Value = serde_json::from_str(&env.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "myapp",
                "profiles": ["default", "prod"],
                "label": "master",
                "version": "v1",
                "propertySources": [
                    { "name": "myapp-prod", "source": { "server.port": "8080", "a": "b" } }
                ]
            })
        );
    }

    #[test]
    fn test_group_preserves_order() {
        let g = group("g", &[("z", "1"), ("a", "2"), ("m", "3")]);
        let keys: Vec<_> = g.source.keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
        assert_eq!(g.len(), 3);
        assert!(!g.is_empty());
    }
}
