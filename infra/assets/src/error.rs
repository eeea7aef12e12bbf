use std::borrow::Cow;

/// A specialized [`AssetError`] enum of this crate.
#[apphost_derive::apphost_error]
pub enum AssetError {
    #[error("Asset not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid asset name{}: {message}", format_context(.context))]
    InvalidName { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Asset I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },
}

impl AssetError {
    pub(crate) fn not_found(name: &str) -> Self {
        Self::NotFound { message: name.to_owned().into(), context: None }
    }
}
