//! Converters between the four representations of a configuration tree.
//!
//! Every representation passes through [`DynamicValue`](crate::DynamicValue):
//!
//! - nested tree ⇄ flat map ([`tree_to_flat`], [`flat_to_tree`]), optionally
//!   mounted under a key prefix ([`tree_to_flat_at`]);
//! - YAML text ⇄ tree ([`yaml_text_to_tree`], [`tree_to_yaml_text`]);
//! - JSON text ⇄ tree ([`json_text_to_tree`], [`tree_to_json_text`]);
//! - properties text ⇄ flat map ([`properties_text_to_flat`],
//!   [`flat_to_properties_text`]).
//!
//! All functions are pure. Empty mappings and sequences have no leaves and
//! therefore disappear when a tree passes through the flat form.

mod json;
mod properties;
mod scalar;
mod tree;
mod yaml;

use std::fmt;

use serde_json::{Map, Value};

use crate::PropsResult;

pub use json::{json_text_to_tree, tree_to_json_compact, tree_to_json_text};
pub use properties::{flat_to_properties_text, properties_text_to_flat};
pub use scalar::{infer_scalar, kind_name, scalar_text};
pub use tree::{flat_to_tree, get_path, set_path, tree_to_flat, tree_to_flat_at};
pub use yaml::{tree_to_yaml_text, yaml_text_to_tree};

/// Flattened leaves keyed by their formatted [`KeyPath`](crate::KeyPath).
///
/// Iteration follows insertion order; overwriting a key keeps its position.
pub type FlatMap = Map<String, Value>;

/// Text formats understood by the converters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum TextFormat {
    /// YAML 1.2 documents (`.yaml`, `.yml`).
    Yaml,
    /// Java-style `key=value` properties (`.properties`).
    Properties,
    /// JSON documents (`.json`).
    Json,
}

impl TextFormat {
    /// Resolve a format from a file extension, ignoring ASCII case.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "properties" => Some(Self::Properties),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Parse `text` of this format into a tree.
    ///
    /// # Errors
    ///
    /// Returns [`PropsError::FormatParse`](crate::PropsError::FormatParse)
    /// for invalid text and
    /// [`PropsError::MalformedKey`](crate::PropsError::MalformedKey) for a
    /// properties key outside the flat key grammar.
    pub fn parse(self, text: &str) -> PropsResult<Value> {
        match self {
            Self::Yaml => yaml_text_to_tree(text),
            Self::Properties => properties_text_to_tree(text),
            Self::Json => json_text_to_tree(text),
        }
    }

    /// Parse `text` of this format straight into flat leaves.
    ///
    /// # Errors
    ///
    /// Returns [`PropsError::FormatParse`](crate::PropsError::FormatParse)
    /// for invalid text.
    pub fn parse_flat(self, text: &str) -> PropsResult<FlatMap> {
        match self {
            Self::Yaml => yaml_text_to_flat(text),
            Self::Properties => properties_text_to_flat(text),
            Self::Json => json_text_to_flat(text),
        }
    }

    /// Render `tree` as text of this format.
    ///
    /// # Errors
    ///
    /// Returns [`PropsError::FormatParse`](crate::PropsError::FormatParse)
    /// when the serializer rejects the tree.
    pub fn render(self, tree: &Value) -> PropsResult<String> {
        match self {
            Self::Yaml => tree_to_yaml_text(tree),
            Self::Properties => Ok(tree_to_properties_text(tree)),
            Self::Json => tree_to_json_text(tree),
        }
    }
}

impl fmt::Display for TextFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Yaml => "YAML",
            Self::Properties => "properties",
            Self::Json => "JSON",
        })
    }
}

/// Parse YAML text and flatten it.
///
/// # Errors
///
/// Returns [`PropsError::FormatParse`](crate::PropsError::FormatParse) for
/// invalid YAML.
pub fn yaml_text_to_flat(text: &str) -> PropsResult<FlatMap> {
    yaml_text_to_tree(text).map(|tree| tree_to_flat(&tree))
}

/// Parse YAML text and flatten it under `prefix`.
///
/// # Errors
///
/// Returns [`PropsError::FormatParse`](crate::PropsError::FormatParse) for
/// invalid YAML and
/// [`PropsError::MalformedKey`](crate::PropsError::MalformedKey) for a
/// malformed `prefix`.
pub fn yaml_text_to_flat_at(prefix: &str, text: &str) -> PropsResult<FlatMap> {
    tree_to_flat_at(prefix, &yaml_text_to_tree(text)?)
}

/// Parse JSON text and flatten it.
///
/// # Errors
///
/// Returns [`PropsError::FormatParse`](crate::PropsError::FormatParse) for
/// invalid JSON.
pub fn json_text_to_flat(text: &str) -> PropsResult<FlatMap> {
    json_text_to_tree(text).map(|tree| tree_to_flat(&tree))
}

/// Parse properties text and rebuild the nested tree.
///
/// # Errors
///
/// Returns [`PropsError::FormatParse`](crate::PropsError::FormatParse) for
/// invalid escapes and
/// [`PropsError::MalformedKey`](crate::PropsError::MalformedKey) for keys
/// outside the flat key grammar.
pub fn properties_text_to_tree(text: &str) -> PropsResult<Value> {
    flat_to_tree(&properties_text_to_flat(text)?)
}

/// Flatten `tree` and render it as properties text.
#[must_use]
pub fn tree_to_properties_text(tree: &Value) -> String {
    flat_to_properties_text(&tree_to_flat(tree))
}

#[cfg(test)]
mod tests;
