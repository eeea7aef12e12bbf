//! Settings loading.
//!
//! [`ConfigLoader`] reads the bundled `appsettings.json` through an
//! [`AssetStore`](apphost_assets::AssetStore) and deserializes it. It never falls
//! back to defaults: a missing file, invalid JSON or a document that does not
//! match the expected shape is an error for the caller to act on.
//!
//! Two optional layers can be applied on top of the base document, in this order:
//!
//! 1. **Environment overlay**: `appsettings.{Environment}.json`, deep-merged over
//!    the base document when present.
//! 2. **Environment variables**: `{PREFIX}__Section__Key=value` replaces
//!    `Section.Key`. Keys match case-insensitively; values are read as JSON scalars
//!    when they parse as such and as strings otherwise.
//!
//! ```rust
//! use apphost_assets::MemoryAssetStore;
//! use apphost_kernel::config::{ConfigLoader, LoaderOptions, SettingsManager};
//! use std::sync::Arc;
//!
//! let assets = MemoryAssetStore::new()
//!     .with("appsettings.json", r#"{"ApiUrl": "https://example.com", "Timeout": 30}"#)?
//!     .with("appsettings.Development.json", r#"{"Timeout": 5}"#)?;
//!
//! let options = LoaderOptions::new()
//!     .environment("Development")
//!     .env_prefix("APPHOST")
//!     .vars([("APPHOST__ApiUrl", "http://localhost:8080")]);
//! let settings = ConfigLoader::with_options(Arc::new(assets), options).load_settings()?;
//!
//! assert_eq!(settings.api_url, "http://localhost:8080");
//! assert_eq!(settings.timeout, 5);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod layering;
mod loader;

pub use error::{ConfigError, ConfigErrorExt};
pub use loader::{ConfigLoader, LoaderOptions, SettingsManager};
