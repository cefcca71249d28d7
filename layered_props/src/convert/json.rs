//! JSON text ⇄ tree.

use serde_json::Value;

use crate::{PropsResult, PropsResultExt};

/// Parse JSON text into a tree, keeping member order.
///
/// # Errors
///
/// Returns [`PropsError::FormatParse`](crate::PropsError::FormatParse) with
/// the line and column of the first syntax error.
pub fn json_text_to_tree(text: &str) -> PropsResult<Value> {
    serde_json::from_str(text).into_props()
}

/// Render a tree as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`PropsError::FormatParse`](crate::PropsError::FormatParse) if
/// serialisation fails.
pub fn tree_to_json_text(tree: &Value) -> PropsResult<String> {
    serde_json::to_string_pretty(tree).into_props()
}

/// Render a tree as single-line JSON.
///
/// # Errors
///
/// Returns [`PropsError::FormatParse`](crate::PropsError::FormatParse) if
/// serialisation fails.
pub fn tree_to_json_compact(tree: &Value) -> PropsResult<String> {
    serde_json::to_string(tree).into_props()
}
