//! Nested document tree

use indexmap::IndexMap;

/// A parsed document value: either a scalar leaf or a mapping of child nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NestedNode {
    Scalar(String),
    Mapping(IndexMap<String, NestedNode>),
}

impl NestedNode {
    /// Create a scalar node
    pub fn scalar(value: impl Into<String>) -> Self {
        NestedNode::Scalar(value.into())
    }

    /// Create an empty mapping node
    pub fn empty() -> Self {
        NestedNode::Mapping(IndexMap::new())
    }

    /// Build a mapping node from key/node pairs, keeping their order
    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, NestedNode)>,
    {
        NestedNode::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn as_mapping(&self) -> Option<&IndexMap<String, NestedNode>> {
        match self {
            NestedNode::Mapping(map) => Some(map),
            NestedNode::Scalar(_) => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            NestedNode::Scalar(value) => Some(value),
            NestedNode::Mapping(_) => None,
        }
    }
}

impl From<&str> for NestedNode {
    fn from(value: &str) -> Self {
        NestedNode::Scalar(value.to_string())
    }
}

impl From<String> for NestedNode {
    fn from(value: String) -> Self {
        NestedNode::Scalar(value)
    }
}
