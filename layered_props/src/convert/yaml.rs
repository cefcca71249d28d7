//! YAML text ⇄ tree, backed by `serde_yaml`.
//!
//! Parsing goes through [`serde_yaml::Value`] so merge keys (`<<`), tags and
//! non-string mapping keys can be normalised before the tree is built.

use std::sync::Arc;

use serde_json::{Map, Number, Value};
use serde_yaml::Value as YamlValue;

use super::TextFormat;
use crate::{PropsError, PropsResult, PropsResultExt};

/// Parse YAML text into a tree.
///
/// Scalars follow the YAML 1.2 core schema: `true`/`false`, `null`/`~`,
/// integers and floats are typed, everything else is a string. Block
/// scalars decode to their literal content. Tags are dropped, merge keys
/// are applied and numeric or boolean mapping keys are stringified.
///
/// # Errors
///
/// Returns [`PropsError::FormatParse`] for invalid YAML, duplicate keys or a
/// sequence/mapping used as a mapping key.
pub fn yaml_text_to_tree(text: &str) -> PropsResult<Value> {
    let mut raw: YamlValue = serde_yaml::from_str(text).into_props()?;
    raw.apply_merge().into_props()?;
    from_yaml(raw)
}

/// Render a tree as block-style YAML.
///
/// # Errors
///
/// Returns [`PropsError::FormatParse`] if the emitter rejects the tree.
pub fn tree_to_yaml_text(tree: &Value) -> PropsResult<String> {
    serde_yaml::to_string(tree).into_props()
}

fn from_yaml(node: YamlValue) -> PropsResult<Value> {
    Ok(match node {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(flag) => Value::Bool(flag),
        YamlValue::Number(number) => from_yaml_number(&number),
        YamlValue::String(text) => Value::String(text),
        YamlValue::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(from_yaml)
                .collect::<PropsResult<Vec<_>>>()?,
        ),
        YamlValue::Mapping(entries) => {
            let mut map = Map::with_capacity(entries.len());
            for (key, value) in entries {
                map.insert(mapping_key(key)?, from_yaml(value)?);
            }
            Value::Object(map)
        }
        YamlValue::Tagged(tagged) => from_yaml(tagged.value)?,
    })
}

fn from_yaml_number(number: &serde_yaml::Number) -> Value {
    if let Some(int) = number.as_i64() {
        return Value::from(int);
    }
    if let Some(uint) = number.as_u64() {
        return Value::from(uint);
    }
    number
        .as_f64()
        .and_then(Number::from_f64)
        .map_or_else(|| Value::String(number.to_string()), Value::Number)
}

fn mapping_key(key: YamlValue) -> PropsResult<String> {
    match key {
        YamlValue::String(text) => Ok(text),
        YamlValue::Number(number) => Ok(number.to_string()),
        YamlValue::Bool(flag) => Ok(flag.to_string()),
        YamlValue::Null => Ok("null".to_owned()),
        YamlValue::Tagged(tagged) => mapping_key(tagged.value),
        YamlValue::Sequence(_) | YamlValue::Mapping(_) => Err(Arc::new(PropsError::FormatParse {
            format: TextFormat::Yaml,
            message: "mapping keys must be scalars".to_owned(),
        })),
    }
}
