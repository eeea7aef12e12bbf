/// Name of the bundled settings asset.
pub const APP_SETTINGS_FILE: &str = "appsettings.json";

/// Stem shared by the base settings asset and its environment overlays.
pub const APP_SETTINGS_STEM: &str = "appsettings";

/// Extension of every settings asset.
pub const APP_SETTINGS_EXTENSION: &str = "json";

/// Separator between path segments in environment variable overrides (`PREFIX__Logging__Level`).
pub const ENV_KEY_SEPARATOR: &str = "__";

/// Returns the asset name of an environment overlay, e.g. `appsettings.Development.json`.
#[must_use]
pub fn environment_settings_file(environment: &str) -> String {
    format!("{APP_SETTINGS_STEM}.{environment}.{APP_SETTINGS_EXTENSION}")
}
