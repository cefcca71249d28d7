//! Tree ⇄ flat conversion and path-addressed access.

use serde_json::{Map, Value};

use super::FlatMap;
use crate::{KeyPath, PropsResult, Step};

/// Flatten `tree` into one entry per scalar leaf.
///
/// Keys are formatted [`KeyPath`]s (`server.ports[0]`). Empty mappings and
/// sequences emit nothing. A scalar root produces the single key `""`.
///
/// ```
/// use layered_props::convert::tree_to_flat;
/// use serde_json::json;
///
/// let flat = tree_to_flat(&json!({"e": [[10, 20], [30, 40]]}));
/// assert_eq!(flat["e[0][1]"], json!(20));
/// assert_eq!(flat.len(), 4);
/// ```
#[must_use]
pub fn tree_to_flat(tree: &Value) -> FlatMap {
    let mut flat = FlatMap::new();
    let mut path = KeyPath::root();
    flatten_into(tree, &mut path, &mut flat);
    flat
}

/// Flatten `tree` with every key mounted under `prefix`.
///
/// `prefix` is parsed as a flat key and becomes the leading steps of every
/// emitted key, so a sequence root yields `prefix[0]`, `prefix[1]`, and a
/// scalar root the single key `prefix`. An empty prefix behaves like
/// [`tree_to_flat`].
///
/// ```
/// use layered_props::convert::tree_to_flat_at;
/// use serde_json::json;
///
/// let flat = tree_to_flat_at("t", &json!({"a": [1, 2]}))?;
/// assert_eq!(flat["t.a[1]"], json!(2));
/// let listed = tree_to_flat_at("t", &json!(["x"]))?;
/// assert_eq!(listed["t[0]"], json!("x"));
/// # Ok::<_, std::sync::Arc<layered_props::PropsError>>(())
/// ```
///
/// # Errors
///
/// Returns [`PropsError::MalformedKey`](crate::PropsError::MalformedKey)
/// when `prefix` is outside the flat key grammar.
pub fn tree_to_flat_at(prefix: &str, tree: &Value) -> PropsResult<FlatMap> {
    let mut path = KeyPath::parse(prefix)?;
    let mut flat = FlatMap::new();
    flatten_into(tree, &mut path, &mut flat);
    Ok(flat)
}

fn flatten_into(node: &Value, path: &mut KeyPath, flat: &mut FlatMap) {
    match node {
        Value::Object(map) => {
            for (key, child) in map {
                path.push_key(key.as_str());
                flatten_into(child, path, flat);
                path.pop();
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                path.push_index(index);
                flatten_into(child, path, flat);
                path.pop();
            }
        }
        scalar => {
            flat.insert(path.to_string(), scalar.clone());
        }
    }
}

/// Rebuild a nested tree from flat leaves.
///
/// Keys are applied in iteration order, each through [`set_path`] on an
/// initially empty mapping. Sequences grow to the highest index seen and
/// gaps hold `null`. When a key needs a container where an earlier key left
/// a different kind of node, the later key replaces that node.
///
/// # Errors
///
/// Returns [`PropsError::MalformedKey`](crate::PropsError::MalformedKey)
/// for a key outside the flat key grammar.
pub fn flat_to_tree(flat: &FlatMap) -> PropsResult<Value> {
    let mut tree = Value::Object(Map::new());
    for (key, value) in flat {
        let path = KeyPath::parse(key)?;
        set_path(&mut tree, &path, value.clone());
    }
    Ok(tree)
}

/// Store `value` at `path`, creating intermediate containers as needed.
///
/// A `Key` step turns a non-mapping node into an empty mapping and an
/// `Index` step turns a non-sequence node into an empty sequence before
/// descending. The empty path replaces `root` itself.
pub fn set_path(root: &mut Value, path: &KeyPath, value: Value) {
    let mut node = root;
    for step in path {
        node = match step {
            Step::Key(key) => {
                if !node.is_object() {
                    *node = Value::Object(Map::new());
                }
                let Value::Object(map) = node else {
                    return;
                };
                map.entry(key.as_str()).or_insert(Value::Null)
            }
            Step::Index(index) => {
                if !node.is_array() {
                    *node = Value::Array(Vec::new());
                }
                let Value::Array(items) = node else {
                    return;
                };
                if items.len() <= *index {
                    items.resize(index.saturating_add(1), Value::Null);
                }
                let Some(slot) = items.get_mut(*index) else {
                    return;
                };
                slot
            }
        };
    }
    *node = value;
}

/// Borrow the node at `path`, if the tree has one there.
#[must_use]
pub fn get_path<'a>(root: &'a Value, path: &KeyPath) -> Option<&'a Value> {
    path.iter().try_fold(root, |node, step| match (step, node) {
        (Step::Key(key), Value::Object(map)) => map.get(key),
        (Step::Index(index), Value::Array(items)) => items.get(*index),
        _ => None,
    })
}
