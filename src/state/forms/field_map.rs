//! Persistent field tree holding one document's values
//!
//! Branches are reference counted. `update_field` copies only the nodes on
//! the updated path, every other branch is shared with the previous map.

use super::field_path::FieldPath;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

type Branch = Arc<BTreeMap<String, FieldNode>>;

/// A node of the field tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldNode {
    Leaf(String),
    Branch(Branch),
}

/// Mapping from field path to string value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldMap {
    root: Branch,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map with every given path set to `""`
    pub fn with_empty_leaves<'a>(paths: impl IntoIterator<Item = &'a FieldPath>) -> Self {
        paths
            .into_iter()
            .fold(Self::new(), |map, path| map.update_field(path, ""))
    }

    /// Return a new map with only the leaf at `path` replaced.
    ///
    /// Missing branches are created. A leaf sitting where a branch is needed
    /// is replaced by that branch.
    pub fn update_field(&self, path: &FieldPath, value: impl Into<String>) -> FieldMap {
        let mut root = Arc::clone(&self.root);
        set_leaf(Arc::make_mut(&mut root), path.segments(), value.into());
        FieldMap { root }
    }

    /// Value of the leaf at `path`, `None` for missing paths and branches
    pub fn get(&self, path: &FieldPath) -> Option<&str> {
        match self.node(path)? {
            FieldNode::Leaf(value) => Some(value),
            FieldNode::Branch(_) => None,
        }
    }

    pub fn node(&self, path: &FieldPath) -> Option<&FieldNode> {
        let (first, rest) = path.segments().split_first()?;
        let mut node = self.root.get(first)?;
        for segment in rest {
            match node {
                FieldNode::Branch(children) => node = children.get(segment)?,
                FieldNode::Leaf(_) => return None,
            }
        }
        Some(node)
    }

    /// All leaves as `(dotted path, value)` in key order
    pub fn leaves(&self) -> Vec<(String, &str)> {
        let mut out = Vec::new();
        collect_leaves(&self.root, "", &mut out);
        out
    }

    /// Nested JSON object mirroring the tree
    pub fn to_json(&self) -> Value {
        branch_to_json(&self.root)
    }
}

fn set_leaf(branch: &mut BTreeMap<String, FieldNode>, segments: &[String], value: String) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };
    if rest.is_empty() {
        branch.insert(head.clone(), FieldNode::Leaf(value));
        return;
    }
    let child = branch
        .entry(head.clone())
        .or_insert_with(|| FieldNode::Branch(Arc::default()));
    if matches!(child, FieldNode::Leaf(_)) {
        *child = FieldNode::Branch(Arc::default());
    }
    if let FieldNode::Branch(children) = child {
        set_leaf(Arc::make_mut(children), rest, value);
    }
}

fn collect_leaves<'a>(
    branch: &'a BTreeMap<String, FieldNode>,
    prefix: &str,
    out: &mut Vec<(String, &'a str)>,
) {
    for (key, node) in branch {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match node {
            FieldNode::Leaf(value) => out.push((path, value.as_str())),
            FieldNode::Branch(children) => collect_leaves(children, &path, out),
        }
    }
}

fn branch_to_json(branch: &BTreeMap<String, FieldNode>) -> Value {
    let object: Map<String, Value> = branch
        .iter()
        .map(|(key, node)| {
            let value = match node {
                FieldNode::Leaf(s) => Value::String(s.clone()),
                FieldNode::Branch(children) => branch_to_json(children),
            };
            (key.clone(), value)
        })
        .collect();
    Value::Object(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn path(raw: &str) -> FieldPath {
        FieldPath::parse(raw).unwrap()
    }

    fn sample() -> FieldMap {
        FieldMap::new()
            .update_field(&path("a.b.c"), "1")
            .update_field(&path("a.b.d"), "2")
            .update_field(&path("a.e"), "3")
            .update_field(&path("f"), "4")
    }

    #[test]
    fn test_update_sets_nested_leaf() {
        let map = sample();
        assert_eq!(map.get(&path("a.b.c")), Some("1"));
        assert_eq!(map.get(&path("a.e")), Some("3"));
        assert_eq!(map.get(&path("f")), Some("4"));
    }

    #[test]
    fn test_update_leaves_previous_map_untouched() {
        let before = sample();
        let after = before.update_field(&path("a.b.c"), "x");
        assert_eq!(before.get(&path("a.b.c")), Some("1"));
        assert_eq!(after.get(&path("a.b.c")), Some("x"));
    }

    #[test]
    fn test_update_keeps_siblings_identical() {
        let before = sample();
        let after = before.update_field(&path("a.b.c"), "x");
        for sibling in ["a.b.d", "a.e", "f"] {
            assert_eq!(
                before.get(&path(sibling)).map(str::as_bytes),
                after.get(&path(sibling)).map(str::as_bytes),
                "sibling {sibling} changed"
            );
        }
    }

    #[test]
    fn test_update_shares_untouched_branches() {
        let before = FieldMap::new()
            .update_field(&path("left.x"), "1")
            .update_field(&path("right.y"), "2");
        let after = before.update_field(&path("left.x"), "changed");

        match (before.node(&path("right")), after.node(&path("right"))) {
            (Some(FieldNode::Branch(old)), Some(FieldNode::Branch(new))) => {
                assert!(Arc::ptr_eq(old, new));
            }
            other => panic!("expected branches, got {other:?}"),
        }
        match (before.node(&path("left")), after.node(&path("left"))) {
            (Some(FieldNode::Branch(old)), Some(FieldNode::Branch(new))) => {
                assert!(!Arc::ptr_eq(old, new));
            }
            other => panic!("expected branches, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_path_creates_branch() {
        let map = FieldMap::new().update_field(&path("new.branch.leaf"), "v");
        assert_eq!(map.get(&path("new.branch.leaf")), Some("v"));
        assert!(matches!(
            map.node(&path("new.branch")),
            Some(FieldNode::Branch(_))
        ));
    }

    #[test]
    fn test_leaf_replaced_by_branch() {
        let map = FieldMap::new()
            .update_field(&path("a"), "leaf")
            .update_field(&path("a.b"), "nested");
        assert_eq!(map.get(&path("a")), None);
        assert_eq!(map.get(&path("a.b")), Some("nested"));
    }

    #[test]
    fn test_get_missing_and_through_leaf() {
        let map = sample();
        assert_eq!(map.get(&path("missing")), None);
        assert_eq!(map.get(&path("f.g")), None);
        assert_eq!(map.get(&path("a.b")), None);
    }

    #[test]
    fn test_leaves_in_key_order() {
        let map = sample();
        let leaves = map.leaves();
        assert_eq!(
            leaves,
            vec![
                ("a.b.c".to_string(), "1"),
                ("a.b.d".to_string(), "2"),
                ("a.e".to_string(), "3"),
                ("f".to_string(), "4"),
            ]
        );
    }

    #[test]
    fn test_with_empty_leaves() {
        let paths = [path("x"), path("y.z")];
        let map = FieldMap::with_empty_leaves(&paths);
        assert_eq!(map.get(&path("x")), Some(""));
        assert_eq!(map.get(&path("y.z")), Some(""));
        assert!(!map.leaves().is_empty());
        assert!(FieldMap::new().leaves().is_empty());
    }

    #[test]
    fn test_to_json_nests_objects() {
        let map = FieldMap::new()
            .update_field(&path("seller_name"), "Asha")
            .update_field(&path("land_details.size"), "2 acres")
            .update_field(&path("land_details.boundaries.north"), "River");
        assert_eq!(
            map.to_json(),
            json!({
                "seller_name": "Asha",
                "land_details": {
                    "size": "2 acres",
                    "boundaries": { "north": "River" }
                }
            })
        );
    }
}
