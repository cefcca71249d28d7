//! Layered configuration properties with a lenient typed mapper.
//!
//! Configuration arrives as YAML, JSON or Java-style properties text, is held
//! by a [`PropertyStore`] in two synchronised forms (a nested tree and a flat
//! map of `a.b[0].c` keys) and is read back either through typed scalar
//! getters or by mapping any subtree onto a `Deserialize` type.
//!
//! - [`convert`]: pure converters between the text formats, trees and flat
//!   maps.
//! - [`KeyPath`]: the flat key grammar.
//! - [`store`]: the layered store (`load`, `append`, `set`).
//! - [`mapper`]: dynamic ⇄ typed conversion with case-insensitive binding.
//! - [`loader`]: resource-directory bootstrap with profile overlays.
//!
//! ```
//! use layered_props::PropertyStore;
//! use layered_props::convert::TextFormat;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Server {
//!     port: u16,
//!     host: String,
//! }
//!
//! let store = PropertyStore::new();
//! store.load(&TextFormat::Yaml.parse("server:\n  port: 8080\n  host: example.org\n")?)?;
//! store.append(TextFormat::Properties.parse_flat("server.port=9090\n")?)?;
//!
//! let server: Server = store.get_object("server")?;
//! assert_eq!((server.port, server.host.as_str()), (9090, "example.org"));
//! # Ok::<_, std::sync::Arc<layered_props::PropsError>>(())
//! ```

use std::sync::Arc;

pub mod convert;
mod error;
mod key_path;
pub mod loader;
pub mod mapper;
mod result_ext;
pub mod store;

pub use convert::{FlatMap, TextFormat};
pub use error::{AggregatedErrors, PropsError};
pub use key_path::{KeyPath, Step};
pub use loader::{Bootstrap, BootstrapOptions, BootstrapReport, ProfileArgs};
pub use mapper::{MapMode, from_dynamic, to_dynamic};
pub use result_ext::{PropsFileExt, PropsResultExt};
pub use store::{PropertyStore, Snapshot};

/// Dynamic configuration value: null, boolean, number, string, sequence or
/// insertion-ordered mapping.
pub type DynamicValue = serde_json::Value;

/// Result alias used throughout the crate.
pub type PropsResult<T> = Result<T, Arc<PropsError>>;
