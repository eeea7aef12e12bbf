use apphost_assets::AssetError;
use std::borrow::Cow;

/// Errors raised while loading the settings document.
#[apphost_derive::apphost_error]
pub enum ConfigError {
    /// The settings asset does not exist in the asset store.
    #[error("Settings resource not found{}: {message}", format_context(.context))]
    ResourceNotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The content is not JSON or does not match the expected shape.
    #[error("Malformed settings{}: {source}", format_context(.context))]
    MalformedConfig { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Settings are not valid UTF-8{}: {source}", format_context(.context))]
    InvalidEncoding { source: std::str::Utf8Error, context: Option<Cow<'static, str>> },

    /// Any other asset store failure (I/O, invalid name).
    #[error("Settings asset error{}: {source}", format_context(.context))]
    Asset { source: AssetError, context: Option<Cow<'static, str>> },

    #[error("Internal settings error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ConfigError {
    /// Maps an asset failure for `name`, keeping "not found" distinguishable.
    pub(crate) fn from_asset(error: AssetError, name: &str) -> Self {
        match error {
            AssetError::NotFound { .. } => {
                Self::ResourceNotFound { message: name.to_owned().into(), context: None }
            },
            source => Self::Asset {
                source,
                context: Some(format!("Failed to read asset: {name}").into()),
            },
        }
    }

    /// Builds a [`ConfigError::MalformedConfig`] for a document that parsed but has the wrong shape.
    pub(crate) fn malformed(message: impl std::fmt::Display, name: &str) -> Self {
        Self::MalformedConfig {
            source: <serde_json::Error as serde::de::Error>::custom(message),
            context: Some(name.to_owned().into()),
        }
    }
}
