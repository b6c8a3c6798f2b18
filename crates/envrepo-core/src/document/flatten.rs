//! Flattening of nested documents into dotted keys

use std::collections::VecDeque;

use indexmap::IndexMap;

use super::node::NestedNode;

/// Flatten a nested mapping into `parent.child` keys.
///
/// Traversal is breadth-first over an unbounded queue, so every scalar at a
/// given depth is emitted before any scalar below it. If two paths collide the
/// one visited last wins. A scalar root has no key to hang off and yields an
/// empty map.
///
/// # Example
///
/// ```
/// use envrepo_core::document::{flatten, NestedNode};
///
/// let doc = NestedNode::mapping([
///     ("server", NestedNode::mapping([("port", NestedNode::scalar("8080"))])),
/// ]);
/// let flat = flatten(&doc);
/// assert_eq!(flat.get("server.port").map(String::as_str), Some("8080"));
/// ```
pub fn flatten(root: &NestedNode) -> IndexMap<String, String> {
    let mut result = IndexMap::new();
    let mut queue: VecDeque<(Option<String>, &IndexMap<String, NestedNode>)> = VecDeque::new();

    if let NestedNode::Mapping(map) = root {
        queue.push_back((None, map));
    }

    while let Some((prefix, map)) = queue.pop_front() {
        for (key, value) in map {
            let full_key = match &prefix {
                Some(prefix) => format!("{}.{}", prefix, key),
                None => key.clone(),
            };
            match value {
                NestedNode::Mapping(child) => queue.push_back((Some(full_key), child)),
                NestedNode::Scalar(scalar) => {
                    result.insert(full_key, scalar.clone());
                }
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(value: &str) -> NestedNode {
        NestedNode::scalar(value)
    }

    fn pairs(map: &IndexMap<String, String>) -> Vec<(&str, &str)> {
        map.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }

    #[test]
    fn test_nested_paths() {
        let doc = NestedNode::mapping([(
            "a",
            NestedNode::mapping([
                ("b", s("1")),
                ("c", NestedNode::mapping([("d", s("2"))])),
            ]),
        )]);

        let flat = flatten(&doc);
        assert_eq!(pairs(&flat), vec![("a.b", "1"), ("a.c.d", "2")]);
    }

    #[test]
    fn test_empty_mapping() {
        assert!(flatten(&NestedNode::empty()).is_empty());
    }

    #[test]
    fn test_top_level_scalar_has_no_prefix() {
        let doc = NestedNode::mapping([("x", s("y"))]);
        assert_eq!(pairs(&flatten(&doc)), vec![("x", "y")]);
    }

    #[test]
    fn test_scalar_root_yields_nothing() {
        assert!(flatten(&s("lonely")).is_empty());
    }

    #[test]
    fn test_breadth_first_order() {
        let doc = NestedNode::mapping([
            ("deep", NestedNode::mapping([("inner", NestedNode::mapping([("leaf", s("3"))]))])),
            ("shallow", s("1")),
            ("mid", NestedNode::mapping([("leaf", s("2"))])),
        ]);

        let flat = flatten(&doc);
        assert_eq!(
            pairs(&flat),
            vec![("shallow", "1"), ("mid.leaf", "2"), ("deep.inner.leaf", "3")]
        );
    }

    #[test]
    fn test_dotted_key_collision_last_visited_wins() {
        // "a.b" as a literal key at the root is visited before the nested a -> b
        let doc = NestedNode::mapping([
            ("a", NestedNode::mapping([("b", s("nested"))])),
            ("a.b", s("literal")),
        ]);

        let flat = flatten(&doc);
        assert_eq!(flat.len(), 1);
        assert_eq!(flat["a.b"], "nested");
    }

    #[test]
    fn test_idempotent() {
        let doc = NestedNode::mapping([
            ("spring", NestedNode::mapping([
                ("datasource", NestedNode::mapping([("url", s("jdbc:h2:mem"))])),
                ("profiles", s("dev")),
            ])),
            ("name", s("svc")),
        ]);

        let first = flatten(&doc);
        let second = flatten(&doc);
        assert_eq!(pairs(&first), pairs(&second));
    }

    #[test]
    fn test_wide_and_deep_document() {
        // Well past any fixed queue capacity
        let mut node = s("bottom");
        for depth in (0..64).rev() {
            node = NestedNode::mapping([(format!("l{}", depth), node)]);
        }
        let wide = NestedNode::mapping(
            (0..100).map(|i| (format!("k{}", i), NestedNode::mapping([("v", s("x"))]))),
        );
        let doc = NestedNode::mapping([("deep", node), ("wide", wide)]);

        let flat = flatten(&doc);
        assert_eq!(flat.len(), 101);
        let deep_key = format!(
            "deep.{}",
            (0..64).map(|d| format!("l{}", d)).collect::<Vec<_>>().join(".")
        );
        assert_eq!(flat[&deep_key], "bottom");
        assert_eq!(flat["wide.k99.v"], "x");
    }
}
