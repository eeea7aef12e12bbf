//! `apphost`: loads `appsettings.json` from an asset directory, wires the host services
//! and starts with logging configured from the `Logging` section.
//!
//! Settings are read before the subscriber exists, so the loader's own events are not
//! captured; the resolved layers are logged again once logging is up.
#![allow(clippy::print_stdout)]

mod args;

use crate::args::Cli;
use anyhow::{Context, Result};
use apphost::ServiceRegistry;
use apphost::assets::{AssetStore, DirAssetStore};
use apphost::domain::constants::{APP_SETTINGS_FILE, environment_settings_file};
use apphost::domain::settings::AppSettings;
use apphost::kernel::config::LoaderOptions;
use apphost::locator;
use apphost_logger::Logger;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let assets: Arc<dyn AssetStore> = Arc::new(
        DirAssetStore::builder()
            .root(&cli.assets)
            .open()
            .with_context(|| format!("Failed to open asset directory {}", cli.assets.display()))?,
    );

    let container = ServiceRegistry::new(Arc::clone(&assets))
        .configure_with(loader_options(&cli))
        .build()
        .context("Failed to build the service container")?;

    let settings = container.resolve::<AppSettings>().context("Failed to load settings")?;

    if cli.dump {
        println!("{}", serde_json::to_string_pretty(&*settings)?);
        return Ok(());
    }

    let _logger = Logger::builder()
        .name(env!("CARGO_PKG_NAME"))
        .settings(&settings.logging)
        .and_then(|builder| builder.init())
        .context("Failed to initialize logging")?;

    log_settings_layers(&cli, assets.as_ref());

    info!(
        api_url = %settings.api_url,
        timeout_secs = settings.timeout,
        sections = settings.extra.len(),
        environment = cli.environment.as_deref().unwrap_or("default"),
        "Settings loaded"
    );
    for service in container.services() {
        info!(service = %service, "Service registered");
    }

    locator::install(container)?;
    info!("Host started");

    locator::teardown();
    Ok(())
}

fn log_settings_layers(cli: &Cli, assets: &dyn AssetStore) {
    let overlay = cli.environment.as_deref().map(environment_settings_file);
    let overlay_applied = overlay.as_deref().is_some_and(|name| assets.exists(name));

    info!(
        base = APP_SETTINGS_FILE,
        overlay = overlay.as_deref().unwrap_or("none"),
        overlay_applied,
        env_prefix = cli.env_prefix.as_deref().unwrap_or("none"),
        "Settings layers resolved"
    );
}

fn loader_options(cli: &Cli) -> LoaderOptions {
    let mut options = LoaderOptions::new();
    if let Some(environment) = &cli.environment {
        options = options.environment(environment);
    }
    if let Some(prefix) = &cli.env_prefix {
        options = options.env_prefix(prefix);
    }
    options
}
