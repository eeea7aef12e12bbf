use super::error::{ConfigError, ConfigErrorExt};
use super::layering;
use apphost_assets::AssetStore;
use apphost_domain::constants::{APP_SETTINGS_FILE, environment_settings_file};
use apphost_domain::settings::AppSettings;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::{debug, info};

/// The settings capability registered in the container.
pub trait SettingsManager: Debug + Send + Sync {
    /// Produces a freshly loaded settings document.
    ///
    /// # Errors
    /// See [`ConfigError`]; nothing is retried and no default is substituted.
    fn load_settings(&self) -> Result<AppSettings, ConfigError>;
}

#[derive(Debug, Clone, Default)]
enum VarSource {
    #[default]
    Process,
    Fixed(Vec<(String, String)>),
}

impl VarSource {
    fn snapshot(&self) -> Vec<(String, String)> {
        match self {
            Self::Process => std::env::vars_os()
                .filter_map(|(name, value)| {
                    Some((name.into_string().ok()?, value.into_string().ok()?))
                })
                .collect(),
            Self::Fixed(vars) => vars.clone(),
        }
    }
}

/// Optional layers applied over the base `appsettings.json`.
///
/// The default applies none, so the loaded document is exactly the file.
#[derive(Debug, Clone, Default)]
pub struct LoaderOptions {
    environment: Option<String>,
    env_prefix: Option<String>,
    vars: VarSource,
}

impl LoaderOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges `appsettings.{name}.json` over the base document when it exists.
    #[must_use]
    pub fn environment(mut self, name: impl Into<String>) -> Self {
        self.environment = Some(name.into());
        self
    }

    /// Applies `{prefix}__Section__Key` environment variables.
    #[must_use]
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Reads overrides from the given pairs instead of the process environment.
    #[must_use]
    pub fn vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.vars = VarSource::Fixed(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    #[must_use]
    pub fn environment_name(&self) -> Option<&str> {
        self.environment.as_deref()
    }

    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.env_prefix.as_deref()
    }
}

/// Loads the settings document from an asset store.
///
/// The loader keeps no cache: every call reads the asset store again. Register it
/// behind a singleton rule to read once per process.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    assets: Arc<dyn AssetStore>,
    options: LoaderOptions,
}

impl ConfigLoader {
    #[must_use]
    pub fn new(assets: Arc<dyn AssetStore>) -> Self {
        Self::with_options(assets, LoaderOptions::default())
    }

    #[must_use]
    pub const fn with_options(assets: Arc<dyn AssetStore>, options: LoaderOptions) -> Self {
        Self { assets, options }
    }

    #[must_use]
    pub const fn options(&self) -> &LoaderOptions {
        &self.options
    }

    /// Loads the settings into an application-defined shape.
    ///
    /// # Errors
    /// - [`ConfigError::ResourceNotFound`] if `appsettings.json` is absent.
    /// - [`ConfigError::MalformedConfig`] if the base file or the overlay is not JSON,
    ///   or the merged document does not deserialize into `T`.
    /// - [`ConfigError::InvalidEncoding`] if a settings asset is not UTF-8.
    /// - [`ConfigError::Asset`] for any other asset store failure.
    pub fn load_settings_as<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        let document = self.load_document()?;
        let keys = document.as_object().map_or(0, serde_json::Map::len);

        let settings = serde_json::from_value(document)
            .context(format!("Failed to deserialize {APP_SETTINGS_FILE}"))?;

        info!(file = APP_SETTINGS_FILE, keys, "Settings loaded");
        Ok(settings)
    }

    /// Loads the merged raw document without deserializing it.
    ///
    /// # Errors
    /// Same as [`ConfigLoader::load_settings_as`], minus shape mismatches.
    pub fn load_document(&self) -> Result<Value, ConfigError> {
        let mut document = self.read_document(APP_SETTINGS_FILE)?;

        if let Some(environment) = self.options.environment_name() {
            let name = environment_settings_file(environment);
            match self.read_document(&name) {
                Ok(overlay) if overlay.is_object() => {
                    layering::merge(&mut document, overlay);
                    info!(file = %name, "Applied environment settings overlay");
                },
                Ok(_) => return Err(ConfigError::malformed("overlay must be a JSON object", &name)),
                Err(ConfigError::ResourceNotFound { .. }) => {
                    debug!(file = %name, "No environment settings overlay");
                },
                Err(e) => return Err(e),
            }
        }

        if let Some(prefix) = self.options.prefix() {
            let vars = self.options.vars.snapshot();
            let applied = layering::apply_env_overrides(&mut document, prefix, vars);
            debug!(prefix, applied, "Applied environment variable overrides");
        }

        Ok(document)
    }

    fn read_document(&self, name: &str) -> Result<Value, ConfigError> {
        debug!(file = name, "Reading settings asset");

        let bytes = self.assets.read(name).map_err(|e| ConfigError::from_asset(e, name))?;
        let text = std::str::from_utf8(&bytes).context(format!("Failed to decode {name}"))?;
        serde_json::from_str(text).context(format!("Failed to parse {name}"))
    }
}

impl SettingsManager for ConfigLoader {
    fn load_settings(&self) -> Result<AppSettings, ConfigError> {
        self.load_settings_as()
    }
}
