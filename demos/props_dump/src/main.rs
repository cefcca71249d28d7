//! Bootstrap a property store from a resource directory and print it.
//!
//! ```text
//! props_dump --dir resources --app.profile dev --format properties
//! props_dump --dir resources --key server.port
//! props_dump --dir resources --redis
//! ```

use std::io::{self, Write};

use camino::Utf8PathBuf;
use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use layered_props::convert::{TextFormat, scalar_text};
use layered_props::{
    Bootstrap, BootstrapOptions, BootstrapReport, PropertyStore, ProfileArgs, to_dynamic,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "props_dump", version, about = "Print layered configuration")]
struct Cli {
    /// Directory holding `application.*` files.
    #[arg(long, default_value = "resources", value_name = "DIR")]
    dir: Utf8PathBuf,
    #[command(flatten)]
    profile: ProfileArgs,
    /// Output format.
    #[arg(long, value_enum, default_value_t = TextFormat::Yaml)]
    format: TextFormat,
    /// Print only the node at this flat key.
    #[arg(long, value_name = "KEY", conflicts_with = "redis")]
    key: Option<String>,
    /// Print the typed `redis` connection settings.
    #[arg(long)]
    redis: bool,
    /// Skip `config/application-default.yml`.
    #[arg(long)]
    no_default_overlay: bool,
}

/// Connection settings read from the `redis` subtree.
#[derive(Debug, Default, Deserialize, Serialize)]
struct RedisSettings {
    host: String,
    port: u16,
    password: String,
    db: u8,
    pool_size: u32,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
    run(&Cli::parse())
}

fn run(cli: &Cli) -> Result<()> {
    let mut options = BootstrapOptions::new(cli.dir.clone()).with_profile_args(&cli.profile);
    if cli.no_default_overlay {
        options = options.without_default_overlay();
    }
    let store = PropertyStore::new();
    let report = Bootstrap::new(options).run(&store)?;
    log_report(&report);

    let node = if cli.redis {
        let settings: RedisSettings = store.get_object("redis")?;
        to_dynamic(&settings)?
    } else if let Some(key) = &cli.key {
        store
            .get(key)
            .ok_or_else(|| eyre!("no configuration value at `{key}`"))?
    } else {
        store.tree()
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(render(&node, cli.format)?.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn log_report(report: &BootstrapReport) {
    report.canonical.as_ref().map_or_else(
        || tracing::warn!("no application.* file found"),
        |file| tracing::info!(%file, profile = ?report.profile, "loaded configuration"),
    );
    for overlay in &report.overlays {
        tracing::info!(%overlay, "applied overlay");
    }
    for (file, err) in &report.skipped {
        tracing::warn!(%file, error = %err, "skipped layer");
    }
    if let Some(module) = &report.api_module {
        tracing::info!(module = module.as_str(), "api module");
    }
}

/// Scalars print as their bare text; containers use `format`.
fn render(node: &Value, format: TextFormat) -> Result<String> {
    if node.is_array() || node.is_object() {
        return Ok(format.render(node)?);
    }
    Ok(format!("{}\n", scalar_text(node)))
}
