//! YAML document parsing

use indexmap::IndexMap;
use serde_yaml::Value;

use super::error::ParseError;
use super::node::NestedNode;

/// Parse a YAML document into a nested tree.
///
/// The root must be a mapping; an empty document parses as an empty mapping.
/// Merge keys (`<<: *anchor`) are resolved before conversion. Scalars keep
/// their textual form (`null` becomes the empty string) and sequences
/// collapse into a comma-joined scalar so they can be bound as lists.
/// Sequences render as `a,b,c`, not as a bracketed `[a, b, c]` listing; the
/// difference is intentional.
pub fn parse_yaml(text: &str) -> Result<NestedNode, ParseError> {
    let mut value: Value = serde_yaml::from_str(text)?;
    value.apply_merge()?;
    match untag(value) {
        Value::Null => Ok(NestedNode::empty()),
        value @ Value::Mapping(_) => to_node(value),
        other => Err(ParseError::NotAMapping(kind(&other))),
    }
}

fn untag(value: Value) -> Value {
    match value {
        Value::Tagged(tagged) => untag(tagged.value),
        other => other,
    }
}

fn to_node(value: Value) -> Result<NestedNode, ParseError> {
    match untag(value) {
        Value::Mapping(mapping) => {
            let mut children = IndexMap::with_capacity(mapping.len());
            for (key, value) in mapping {
                children.insert(render_inline(&key)?, to_node(value)?);
            }
            Ok(NestedNode::Mapping(children))
        }
        other => Ok(NestedNode::Scalar(render_inline(&other)?)),
    }
}

fn render_inline(value: &Value) -> Result<String, ParseError> {
    Ok(match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(items) => items
            .iter()
            .map(render_inline)
            .collect::<Result<Vec<_>, _>>()?
            .join(","),
        Value::Mapping(_) => serde_json::to_string(value)?,
        Value::Tagged(tagged) => render_inline(&tagged.value)?,
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
