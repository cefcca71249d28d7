//! Resource-directory bootstrap.
//!
//! [`Bootstrap::run`] fills a [`PropertyStore`] from a resource directory:
//!
//! 1. the first canonical file present, in the order `application.yaml`,
//!    `application.yml`, `application.properties`, `application.json`, is
//!    loaded (the others are not read);
//! 2. when a profile is active it is recorded under `base.profiles.active`
//!    and every `application-<profile>.<ext>` overlay is appended, in the
//!    same extension order;
//! 3. `config/application-default.yml` is appended when present.
//!
//! Unreadable or unparseable layers are logged, listed in the
//! [`BootstrapReport`] and skipped.
//!
//! ```
//! use layered_props::{Bootstrap, BootstrapOptions, PropertyStore};
//!
//! let dir = tempfile::tempdir()?;
//! std::fs::write(dir.path().join("application.yml"), "server:\n  port: 8080\n")?;
//! std::fs::write(dir.path().join("application-dev.properties"), "server.port=9090\n")?;
//!
//! let root = camino::Utf8PathBuf::try_from(dir.path().to_path_buf())?;
//! let store = PropertyStore::new();
//! let report = Bootstrap::new(BootstrapOptions::new(root).with_profile("dev")).run(&store)?;
//!
//! assert!(report.config_exists());
//! assert_eq!(store.get_u16("server.port"), 9090);
//! assert_eq!(store.get_string("base.profiles.active"), "dev");
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

mod files;
mod profile;

use std::io::ErrorKind;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use serde_json::Value;

use crate::convert::TextFormat;
use crate::{PropertyStore, PropsError, PropsFileExt, PropsResult};

pub use files::{append_file, format_of, load_file};
pub use profile::{ProfileArgs, profile_from_file_name};

/// Canonical file names, highest priority first.
pub const CANONICAL_FILES: [&str; 4] = [
    "application.yaml",
    "application.yml",
    "application.properties",
    "application.json",
];

const OVERLAY_EXTENSIONS: [&str; 4] = ["yaml", "yml", "properties", "json"];

/// Overlay appended after the profile layers, relative to the resource
/// directory.
pub const DEFAULT_OVERLAY: &str = "config/application-default.yml";

/// Flat key recording the active profile.
pub const ACTIVE_PROFILE_KEY: &str = "base.profiles.active";

/// Flat key naming the application's API module.
pub const API_MODULE_KEY: &str = "api-module";

/// Where and how [`Bootstrap`] looks for configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BootstrapOptions {
    /// Directory holding `application.*` files.
    pub resource_dir: Utf8PathBuf,
    /// Explicit profile; wins over [`ProfileArgs`].
    pub profile: Option<String>,
    /// Whether to append [`DEFAULT_OVERLAY`].
    pub default_overlay: bool,
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self::new(".")
    }
}

impl BootstrapOptions {
    /// Options for `resource_dir` with no profile and the default overlay
    /// enabled.
    #[must_use]
    pub fn new(resource_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            resource_dir: resource_dir.into(),
            profile: None,
            default_overlay: true,
        }
    }

    /// Select `profile` explicitly.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Take the profile from parsed arguments unless one is already set.
    #[must_use]
    pub fn with_profile_args(mut self, args: &ProfileArgs) -> Self {
        if self.active_profile().is_none() {
            self.profile = args.active().map(str::to_owned);
        }
        self
    }

    /// Skip [`DEFAULT_OVERLAY`].
    #[must_use]
    pub const fn without_default_overlay(mut self) -> Self {
        self.default_overlay = false;
        self
    }

    /// The profile in effect, ignoring blank values.
    #[must_use]
    pub fn active_profile(&self) -> Option<&str> {
        profile::active_profile(self.profile.as_deref())
    }
}

/// Outcome of a [`Bootstrap::run`].
#[derive(Debug, Default)]
pub struct BootstrapReport {
    /// Canonical file that was found, relative to the resource directory.
    pub canonical: Option<Utf8PathBuf>,
    /// Active profile, if any.
    pub profile: Option<String>,
    /// Overlays appended, in order, relative to the resource directory.
    pub overlays: Vec<Utf8PathBuf>,
    /// Layers that existed but could not be read or parsed.
    pub skipped: Vec<(Utf8PathBuf, Arc<PropsError>)>,
    /// Value of [`API_MODULE_KEY`] after all layers were applied.
    pub api_module: Option<String>,
}

impl BootstrapReport {
    /// Whether a canonical `application.*` file was found.
    #[must_use]
    pub const fn config_exists(&self) -> bool {
        self.canonical.is_some()
    }
}

/// Fills a store from a resource directory.
#[derive(Clone, Debug, Default)]
pub struct Bootstrap {
    options: BootstrapOptions,
}

enum Layer {
    Load,
    Append,
}

impl Bootstrap {
    /// A bootstrap driven by `options`.
    #[must_use]
    pub const fn new(options: BootstrapOptions) -> Self {
        Self { options }
    }

    /// The options this bootstrap runs with.
    #[must_use]
    pub const fn options(&self) -> &BootstrapOptions {
        &self.options
    }

    /// Apply every layer found in the resource directory to `store`.
    ///
    /// A missing resource directory leaves the store untouched and reports
    /// no canonical file. Layer failures are collected in
    /// [`BootstrapReport::skipped`].
    ///
    /// # Errors
    ///
    /// Returns [`PropsError::File`] when the resource directory exists but
    /// cannot be opened.
    pub fn run(&self, store: &PropertyStore) -> PropsResult<BootstrapReport> {
        let root = &self.options.resource_dir;
        let mut report = BootstrapReport {
            profile: self.options.active_profile().map(str::to_owned),
            ..BootstrapReport::default()
        };
        let dir = match Dir::open_ambient_dir(root, ambient_authority()) {
            Ok(dir) => dir,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::warn!(%root, "resource directory does not exist");
                return Ok(report);
            }
            Err(err) => return Err(err).for_file(root),
        };

        CANONICAL_FILES.iter().find(|name| dir.is_file(name)).map_or_else(
            || tracing::debug!(%root, "no canonical configuration file"),
            |name| {
                let canonical = Utf8PathBuf::from(*name);
                self.apply(&dir, &canonical, Layer::Load, store, &mut report);
                report.canonical = Some(canonical);
            },
        );

        if let Some(profile) = report.profile.clone() {
            store.set(ACTIVE_PROFILE_KEY, Value::String(profile.clone()));
            for ext in OVERLAY_EXTENSIONS {
                let name = Utf8PathBuf::from(format!("application-{profile}.{ext}"));
                if dir.is_file(&name) {
                    self.apply(&dir, &name, Layer::Append, store, &mut report);
                }
            }
        }

        let overlay = Utf8Path::new(DEFAULT_OVERLAY);
        if self.options.default_overlay && dir.is_file(overlay) {
            self.apply(&dir, overlay, Layer::Append, store, &mut report);
        }

        report.api_module = store
            .get(API_MODULE_KEY)
            .filter(|value| !value.is_null())
            .map(|_| store.get_string(API_MODULE_KEY));
        Ok(report)
    }

    fn apply(
        &self,
        dir: &Dir,
        name: &Utf8Path,
        layer: Layer,
        store: &PropertyStore,
        report: &mut BootstrapReport,
    ) {
        let shown = self.options.resource_dir.join(name);
        let applied = format_of(name)
            .ok_or_else(|| {
                Arc::new(PropsError::File {
                    path: shown.clone(),
                    source: "unrecognised configuration file extension".into(),
                })
            })
            .and_then(|format: TextFormat| files::read_layer(dir, name, &shown, format))
            .and_then(|tree| match layer {
                Layer::Load => store.load(&tree),
                Layer::Append => store.append_tree(&tree),
            });
        match applied {
            Ok(()) => {
                tracing::debug!(path = %shown, "applied configuration layer");
                if matches!(layer, Layer::Append) {
                    report.overlays.push(name.to_path_buf());
                }
            }
            Err(err) => {
                tracing::warn!(path = %shown, error = %err, "skipping configuration layer");
                report.skipped.push((name.to_path_buf(), err));
            }
        }
    }
}
