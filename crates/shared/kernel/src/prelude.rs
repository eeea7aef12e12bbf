pub use crate::config::{ConfigError, ConfigErrorExt, ConfigLoader, LoaderOptions, SettingsManager};
pub use crate::container::{Container, ContainerBuilder, ContainerError, Lifetime, Resolver};
pub use apphost_assets::{AssetError, AssetStore};
pub use apphost_domain::registry::ServiceKey;
pub use apphost_domain::settings::{AppSettings, LoggingSettings};
