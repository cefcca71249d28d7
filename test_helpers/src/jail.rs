//! Shared helpers for working with `figment::Jail` in tests.
//!
//! ```
//! use layered_props_test_helpers::jail::{with_jail, write_resources};
//!
//! let exists = with_jail(|j| {
//!     write_resources(j, &[("config/application-default.yml", "a: 1\n")])?;
//!     Ok(std::path::Path::new("config/application-default.yml").is_file())
//! })?;
//! assert!(exists);
//! # Ok::<_, anyhow::Error>(())
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Result, anyhow};

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// The jail is torn down once the closure completes, even when it fails.
///
/// # Errors
///
/// Returns an error if the jail cannot be created or the closure returns a
/// [`figment::error::Error`].
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|j| {
        output = Some(f(j)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Converts any error implementing [`ToString`] into a [`figment::Error`].
#[expect(
    clippy::needless_pass_by_value,
    reason = "callers usually hand over an owned error from `map_err`"
)]
pub fn figment_error<E: ToString>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}

/// Writes `(relative path, contents)` pairs into the jail's directory,
/// creating parent directories as needed.
///
/// # Errors
///
/// Returns an error when a directory or file cannot be written.
pub fn write_resources(
    jail: &mut figment::Jail,
    files: &[(&str, &str)],
) -> figment::error::Result<()> {
    for (name, contents) in files {
        if let Some(parent) = Path::new(name).parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(jail.directory().join(parent)).map_err(figment_error)?;
        }
        jail.create_file(name, contents)?;
    }
    Ok(())
}
