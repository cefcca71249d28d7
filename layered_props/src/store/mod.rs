//! In-memory layered property store.
//!
//! A [`PropertyStore`] keeps one [`Snapshot`] (flat leaves plus the tree they
//! describe) behind a read/write lock. Every mutation is serialised by a
//! writer mutex, computes the next snapshot off to the side and swaps it in,
//! so readers never see a flat map that disagrees with its tree.
//!
//! ```
//! use layered_props::PropertyStore;
//! use serde_json::json;
//!
//! let store = PropertyStore::new();
//! store.load(&json!({ "a": 1, "b": 2 }))?;
//! store.append_tree(&json!({ "b": 3, "c": 4 }))?;
//! assert_eq!(store.tree(), json!({ "a": 1, "b": 3, "c": 4 }));
//! assert_eq!(store.get_i32("b"), 3);
//! # Ok::<_, std::sync::Arc<layered_props::PropsError>>(())
//! ```

mod snapshot;
mod typed;

use std::sync::Arc;

use figment::value::{Dict, Map as ProfileMap};
use figment::{Metadata, Profile, Provider};
use parking_lot::{Mutex, RwLock};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::convert::{FlatMap, get_path, set_path, tree_to_flat, tree_to_flat_at};
use crate::mapper::{MapMode, from_dynamic_at};
use crate::{KeyPath, PropsResult};

pub use snapshot::Snapshot;

/// Compatibility class used by [`PropertyStore::set`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TypeClass {
    Base,
    Sequence,
    Mapping,
}

impl TypeClass {
    const fn of(value: &Value) -> Self {
        match value {
            Value::Array(_) => Self::Sequence,
            Value::Object(_) => Self::Mapping,
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Self::Base,
        }
    }
}

/// Layered configuration store with typed accessors.
///
/// Layers are applied with [`load`](Self::load) (replace) and
/// [`append`](Self::append) (overlay, last writer wins per leaf key).
#[derive(Debug, Default)]
pub struct PropertyStore {
    state: RwLock<Arc<Snapshot>>,
    writer: Mutex<()>,
    bootstrapped: Mutex<bool>,
}

impl PropertyStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current snapshot. Later mutations do not affect it.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.state.read())
    }

    fn publish(&self, next: Snapshot) {
        *self.state.write() = Arc::new(next);
    }

    /// Replace the whole configuration with `tree`.
    ///
    /// Leaves whose flattened key cannot be parsed back (a mapping key such
    /// as `name[x]`) are skipped and logged at `debug` level.
    ///
    /// # Errors
    ///
    /// Returns [`PropsError::Conversion`](crate::PropsError::Conversion) when
    /// the root is not a mapping. The store is left unchanged on error.
    pub fn load(&self, tree: &Value) -> PropsResult<()> {
        let _writer = self.writer.lock();
        let next = Snapshot::from_tree(tree)?;
        tracing::debug!(leaves = next.flat().len(), "loaded configuration layer");
        self.publish(next);
        Ok(())
    }

    /// Overlay flat leaves; each fragment key overwrites the same key.
    ///
    /// Leaves not named in `fragment` are kept. A fragment key that needs a
    /// different kind of node than the store holds replaces that node.
    ///
    /// # Errors
    ///
    /// Returns [`PropsError::MalformedKey`](crate::PropsError::MalformedKey)
    /// for a fragment key outside the flat key grammar. The store is left
    /// unchanged on error.
    pub fn append(&self, fragment: FlatMap) -> PropsResult<()> {
        let _writer = self.writer.lock();
        let mut flat = self.snapshot().flat().clone();
        let appended = fragment.len();
        flat.extend(fragment);
        let next = Snapshot::from_flat(&flat)?;
        tracing::debug!(appended, leaves = next.flat().len(), "appended configuration layer");
        self.publish(next);
        Ok(())
    }

    /// Overlay a tree; shorthand for `append(tree_to_flat(tree))`.
    ///
    /// Leaves whose flattened key cannot be parsed (a mapping key holding
    /// brackets) are skipped rather than failing the layer.
    ///
    /// # Errors
    ///
    /// As [`append`](Self::append).
    pub fn append_tree(&self, tree: &Value) -> PropsResult<()> {
        self.append(snapshot::addressable(tree_to_flat(tree)))
    }

    /// Overlay a tree mounted under `prefix`.
    ///
    /// ```
    /// use layered_props::PropertyStore;
    /// use serde_json::json;
    ///
    /// let store = PropertyStore::new();
    /// store.append_at("cache.redis", &json!({ "host": "r1", "port": 6379 }))?;
    /// assert_eq!(store.get_string("cache.redis.host"), "r1");
    /// # Ok::<_, std::sync::Arc<layered_props::PropsError>>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`PropsError::MalformedKey`](crate::PropsError::MalformedKey)
    /// for a malformed `prefix`; otherwise as [`append`](Self::append).
    pub fn append_at(&self, prefix: &str, tree: &Value) -> PropsResult<()> {
        self.append(snapshot::addressable(tree_to_flat_at(prefix, tree)?))
    }

    /// Set the leaf or subtree at `key`.
    ///
    /// When a node already exists at `key` and its type class (scalar,
    /// sequence or mapping) differs from `value`'s, nothing changes. A
    /// malformed or empty key is ignored too. Both cases are logged at
    /// `debug` level.
    pub fn set(&self, key: &str, value: Value) {
        let path = match KeyPath::parse(key) {
            Ok(path) if !path.is_empty() => path,
            Ok(_) => {
                tracing::debug!("ignoring set on the root key");
                return;
            }
            Err(err) => {
                tracing::debug!(key, error = %err, "ignoring set on malformed key");
                return;
            }
        };
        let _writer = self.writer.lock();
        let current = self.snapshot();
        if let Some(existing) = get_path(current.tree(), &path) {
            let (was, now) = (TypeClass::of(existing), TypeClass::of(&value));
            if was != now {
                tracing::debug!(key, ?was, ?now, "ignoring set that changes the value type");
                return;
            }
        }
        let mut tree = current.tree().clone();
        set_path(&mut tree, &path, value);
        match Snapshot::from_tree(&tree) {
            Ok(next) => self.publish(next),
            Err(err) => tracing::debug!(key, error = %err, "ignoring set"),
        }
    }

    /// Drop every layer.
    pub fn clear(&self) {
        let _writer = self.writer.lock();
        self.publish(Snapshot::default());
    }

    /// Run `bootstrap` against this store unless an earlier call succeeded.
    ///
    /// Returns `Ok(true)` when `bootstrap` ran and succeeded, `Ok(false)`
    /// when the store was already bootstrapped. A failed bootstrap may be
    /// retried.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `bootstrap`.
    pub fn bootstrap_once<F>(&self, bootstrap: F) -> PropsResult<bool>
    where
        F: FnOnce(&Self) -> PropsResult<()>,
    {
        let mut done = self.bootstrapped.lock();
        if *done {
            return Ok(false);
        }
        bootstrap(self)?;
        *done = true;
        Ok(true)
    }

    /// Copy of the flat leaves.
    #[must_use]
    pub fn flat(&self) -> FlatMap {
        self.snapshot().flat().clone()
    }

    /// Copy of the tree.
    #[must_use]
    pub fn tree(&self) -> Value {
        self.snapshot().tree().clone()
    }

    /// Number of flat leaves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot().flat().len()
    }

    /// Whether the store holds no leaves.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot().flat().is_empty()
    }

    /// Whether `key` addresses a leaf or a branch.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Clone the node at `key`; indexed keys such as `servers[1].host` are
    /// allowed and the empty key returns the whole tree.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        let path = KeyPath::parse(key).ok()?;
        get_path(self.snapshot().tree(), &path).cloned()
    }

    /// Map the node at `key` onto `T`, leniently.
    ///
    /// An absent key yields `T`'s zero value; the empty key maps the whole
    /// tree.
    ///
    /// # Errors
    ///
    /// Returns [`PropsError::MalformedKey`](crate::PropsError::MalformedKey)
    /// for a malformed key and
    /// [`PropsError::Conversion`](crate::PropsError::Conversion) when the
    /// node's shape cannot satisfy `T`.
    pub fn get_object<T: DeserializeOwned>(&self, key: &str) -> PropsResult<T> {
        self.map_node(key, MapMode::Lenient)
    }

    /// As [`get_object`](Self::get_object), but every failed coercion is
    /// reported.
    ///
    /// # Errors
    ///
    /// As [`get_object`](Self::get_object), plus the strict-mode errors
    /// described on [`MapMode::Strict`].
    pub fn get_object_strict<T: DeserializeOwned>(&self, key: &str) -> PropsResult<T> {
        self.map_node(key, MapMode::Strict)
    }

    fn map_node<T: DeserializeOwned>(&self, key: &str, mode: MapMode) -> PropsResult<T> {
        let path = KeyPath::parse(key)?;
        let snapshot = self.snapshot();
        let node = get_path(snapshot.tree(), &path);
        from_dynamic_at(node, path, mode)
    }
}

impl Provider for PropertyStore {
    fn metadata(&self) -> Metadata {
        Metadata::named("layered property store")
    }

    fn data(&self) -> Result<ProfileMap<Profile, Dict>, figment::Error> {
        self.snapshot().data()
    }
}

#[cfg(test)]
mod tests;
