//! Immutable flat/tree pair published by the store.

use figment::value::{Dict, Map as ProfileMap};
use figment::{Metadata, Profile, Provider};
use serde_json::{Map, Value};

use crate::convert::{FlatMap, flat_to_tree, kind_name, tree_to_flat};
use crate::{KeyPath, PropsError, PropsResult};

/// Drop leaves whose key falls outside the flat key grammar.
///
/// A mapping key such as `name[x]` flattens to a key that cannot be parsed
/// back; the leaf is skipped so the rest of the layer still loads.
pub(super) fn addressable(mut flat: FlatMap) -> FlatMap {
    flat.retain(|key, _| {
        KeyPath::parse(key)
            .inspect_err(|err| tracing::debug!(error = %err, "skipping unaddressable leaf"))
            .is_ok()
    });
    flat
}

/// One consistent view of the store: the flat leaves and the tree they
/// describe.
///
/// Both forms are canonical: `flat == tree_to_flat(tree)` and
/// `tree == flat_to_tree(flat)` always hold, so empty containers never
/// survive into a snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    flat: FlatMap,
    tree: Value,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            flat: FlatMap::new(),
            tree: Value::Object(Map::new()),
        }
    }
}

impl Snapshot {
    /// Canonicalise a set of flat leaves.
    ///
    /// The empty key would replace the root, so it is rejected like any
    /// other non-mapping root.
    pub(super) fn from_flat(flat: &FlatMap) -> PropsResult<Self> {
        let tree = flat_to_tree(flat)?;
        if !tree.is_object() {
            return Err(PropsError::conversion("", "mapping", kind_name(&tree)).into());
        }
        Ok(Self {
            flat: tree_to_flat(&tree),
            tree,
        })
    }

    /// Canonicalise a tree; the root must be a mapping.
    ///
    /// Leaves whose flattened key cannot be parsed are skipped.
    pub(super) fn from_tree(tree: &Value) -> PropsResult<Self> {
        if !tree.is_object() {
            return Err(PropsError::conversion("", "mapping", kind_name(tree)).into());
        }
        Self::from_flat(&addressable(tree_to_flat(tree)))
    }

    /// Flat leaves keyed by formatted key path, in insertion order.
    #[must_use]
    pub const fn flat(&self) -> &FlatMap {
        &self.flat
    }

    /// The nested tree; always a mapping.
    #[must_use]
    pub const fn tree(&self) -> &Value {
        &self.tree
    }
}

impl Provider for Snapshot {
    fn metadata(&self) -> Metadata {
        Metadata::named("layered property store")
    }

    fn data(&self) -> Result<ProfileMap<Profile, Dict>, figment::Error> {
        figment::providers::Serialized::defaults(&self.tree).data()
    }
}
