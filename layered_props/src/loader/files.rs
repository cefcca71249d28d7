//! Single-file loading through `cap-std`.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use serde_json::{Map, Value};

use crate::convert::{TextFormat, kind_name};
use crate::{PropertyStore, PropsError, PropsFileExt, PropsResult};

/// Format implied by `path`'s extension (case-insensitive).
#[must_use]
pub fn format_of(path: &Utf8Path) -> Option<TextFormat> {
    path.extension().and_then(TextFormat::from_extension)
}

fn parent_or_dot(path: &Utf8Path) -> &Utf8Path {
    path.parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."))
}

/// Read and parse the layer `name` inside `dir`; errors name `shown`.
///
/// Empty documents yield an empty mapping; any other non-mapping root is
/// rejected.
pub(super) fn read_layer(
    dir: &Dir,
    name: &Utf8Path,
    shown: &Utf8Path,
    format: TextFormat,
) -> PropsResult<Value> {
    let text = dir.read_to_string(name).for_file(shown)?;
    let tree = format.parse(&text).for_file(shown)?;
    match tree {
        Value::Null => Ok(Value::Object(Map::new())),
        Value::Object(_) => Ok(tree),
        other => Err(PropsError::conversion("", "mapping", kind_name(&other))).for_file(shown),
    }
}

/// Open the parent of `path` and read the file as a layer of `format`.
fn read_path(path: &Utf8Path, format: TextFormat) -> PropsResult<Value> {
    let dir = Dir::open_ambient_dir(parent_or_dot(path), ambient_authority()).for_file(path)?;
    let name = path
        .file_name()
        .map(Utf8PathBuf::from)
        .ok_or_else(|| std::io::Error::other("path has no file name"))
        .for_file(path)?;
    read_layer(&dir, &name, path, format)
}

/// Replace the store's contents with the file at `path`.
///
/// Returns `Ok(false)` without touching the store when the extension is not
/// `yaml`, `yml`, `properties` or `json`.
///
/// # Errors
///
/// Returns [`PropsError::File`] when the file cannot be read or parsed, or
/// its root is not a mapping.
pub fn load_file(store: &PropertyStore, path: &Utf8Path) -> PropsResult<bool> {
    let Some(format) = format_of(path) else {
        tracing::debug!(%path, "ignoring file with unknown extension");
        return Ok(false);
    };
    store.load(&read_path(path, format)?)?;
    tracing::debug!(%path, %format, "loaded configuration file");
    Ok(true)
}

/// Overlay the file at `path` onto the store.
///
/// Returns `Ok(false)` without touching the store when the extension is not
/// recognised.
///
/// # Errors
///
/// As [`load_file`].
pub fn append_file(store: &PropertyStore, path: &Utf8Path) -> PropsResult<bool> {
    let Some(format) = format_of(path) else {
        tracing::debug!(%path, "ignoring file with unknown extension");
        return Ok(false);
    };
    store.append_tree(&read_path(path, format)?)?;
    tracing::debug!(%path, %format, "appended configuration file");
    Ok(true)
}
