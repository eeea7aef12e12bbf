//! # CLI Argument Definitions

use clap::Parser;
use std::path::PathBuf;

/// Starts the host: loads the bundled settings and wires the service container.
#[derive(Debug, Parser)]
#[command(name = "apphost")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Application host bootstrapper")]
pub(crate) struct Cli {
    /// Directory holding the bundled assets (`appsettings.json`, ...).
    #[arg(short, long, env = "APPHOST_ASSETS", default_value = ".")]
    pub(crate) assets: PathBuf,

    /// Environment name; merges `appsettings.{ENVIRONMENT}.json` when present.
    #[arg(short, long, env = "APPHOST_ENVIRONMENT")]
    pub(crate) environment: Option<String>,

    /// Prefix of environment variable overrides (`{PREFIX}__Section__Key`).
    #[arg(long, value_name = "PREFIX")]
    pub(crate) env_prefix: Option<String>,

    /// Print the loaded settings as JSON and exit.
    #[arg(long)]
    pub(crate) dump: bool,
}
