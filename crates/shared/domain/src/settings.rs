//! Shape of the host settings document (`appsettings.json`).
//!
//! Keys are PascalCase. The typed fields are the ones the host itself needs; any
//! other top-level key is kept verbatim in [`AppSettings::extra`] so applications
//! can read their own sections without redeclaring the whole document.

use apphost_derive::settings_model;
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::time::Duration;

/// The deserialized settings document.
///
/// `ApiUrl` and `Timeout` are required: a document missing either, or carrying a
/// value of the wrong type, fails to deserialize instead of falling back to a default.
#[settings_model]
pub struct AppSettings {
    pub api_url: String,
    /// Request timeout in seconds.
    pub timeout: u64,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AppSettings {
    /// Returns the raw value stored under a top-level key.
    ///
    /// Typed fields are reachable under their document names (`ApiUrl`, `Timeout`,
    /// `Logging`) as well as every key preserved in [`AppSettings::extra`].
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        match key {
            "ApiUrl" => Some(Value::String(self.api_url.clone())),
            "Timeout" => Some(Value::from(self.timeout)),
            "Logging" => serde_json::to_value(&self.logging).ok(),
            _ => self.extra.get(key).cloned(),
        }
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// The optional `Logging` section.
#[settings_model(default = true)]
pub struct LoggingSettings {
    /// Minimum level (`Trace`, `Debug`, `Information`, `Warning`, `Error`, `Critical`, `None`).
    pub level: String,
    pub console: bool,
    /// Emit JSON lines instead of the compact text format.
    pub json: bool,
    /// Directory for rolling log files; file output is disabled when absent.
    pub directory: Option<PathBuf>,
    /// Explicit filter directives (`apphost=debug,apphost_kernel=trace`).
    pub filter: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "Information".to_owned(),
            console: true,
            json: false,
            directory: None,
            filter: None,
        }
    }
}
