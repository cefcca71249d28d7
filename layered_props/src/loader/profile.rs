//! Active-profile selection.

use clap::Args;

/// Command-line and environment source for the active profile.
///
/// Flatten into an application's own parser:
///
/// ```
/// use clap::Parser;
/// use layered_props::ProfileArgs;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(flatten)]
///     profile: ProfileArgs,
/// }
///
/// let cli = Cli::parse_from(["app", "--app.profile", "dev"]);
/// assert_eq!(cli.profile.profile.as_deref(), Some("dev"));
/// ```
#[derive(Args, Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileArgs {
    /// Profile whose `application-<profile>.*` overlays are applied.
    #[arg(long = "app.profile", env = "APP_PROFILE", value_name = "PROFILE")]
    pub profile: Option<String>,
}

impl ProfileArgs {
    /// The selected profile, ignoring blank values.
    #[must_use]
    pub fn active(&self) -> Option<&str> {
        active_profile(self.profile.as_deref())
    }
}

pub(super) fn active_profile(profile: Option<&str>) -> Option<&str> {
    profile.map(str::trim).filter(|name| !name.is_empty())
}

/// Profile named by an overlay file name.
///
/// ```
/// use layered_props::loader::profile_from_file_name;
///
/// assert_eq!(profile_from_file_name("application-dev.yml"), Some("dev"));
/// assert_eq!(profile_from_file_name("application-eu-west.properties"), Some("eu-west"));
/// assert_eq!(profile_from_file_name("application.yml"), None);
/// ```
#[must_use]
pub fn profile_from_file_name(file_name: &str) -> Option<&str> {
    let stem = file_name.split_once('.').map_or(file_name, |(stem, _)| stem);
    stem.strip_prefix("application-")
        .filter(|profile| !profile.is_empty())
}
