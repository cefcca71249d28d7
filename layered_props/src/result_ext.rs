//! Extensions for mapping errors to `PropsResult` concisely.
//!
//! These helpers replace `.map_err(|e| Arc::new(PropsError::from(e)))`
//! chains when converting parser errors into the crate's
//! `PropsResult<T>` alias (`Result<T, Arc<PropsError>>`).
//!
//! # Examples
//!
//! ```
//! use layered_props::{PropsResult, PropsResultExt};
//!
//! fn parse(text: &str) -> PropsResult<serde_json::Value> {
//!     serde_json::from_str(text).into_props()
//! }
//!
//! assert!(parse("{}").is_ok());
//! assert!(parse("{").is_err());
//! ```

use std::sync::Arc;

use camino::Utf8Path;

use crate::{PropsError, PropsResult};

/// Generic extension for mapping any `Result<T, E>` with `E: Into<PropsError>`
/// into a `PropsResult<T>`.
pub trait PropsResultExt<T> {
    /// Convert `Result<T, E>` into `PropsResult<T>` using `Into<PropsError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<PropsError>`.
    fn into_props(self) -> PropsResult<T>;
}

impl<T, E> PropsResultExt<T> for Result<T, E>
where
    E: Into<PropsError>,
{
    fn into_props(self) -> PropsResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}

/// Extension attaching a file path to I/O and parse failures.
pub trait PropsFileExt<T> {
    /// Convert the error into [`PropsError::File`] for `path`.
    ///
    /// # Errors
    ///
    /// Propagates the original error wrapped with the path.
    fn for_file(self, path: &Utf8Path) -> PropsResult<T>;
}

impl<T, E> PropsFileExt<T> for Result<T, E>
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    fn for_file(self, path: &Utf8Path) -> PropsResult<T> {
        self.map_err(|e| {
            Arc::new(PropsError::File {
                path: path.to_path_buf(),
                source: e.into(),
            })
        })
    }
}
