use crate::error::{AssetError, AssetErrorExt};
use std::fmt::Debug;
use std::io::Read;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A read-only provider of named resources bundled with the application.
///
/// Names are relative and `/`-separated (`appsettings.json`, `i18n/en.json`).
/// Absolute names and names that climb above the store root are rejected with
/// [`AssetError::InvalidName`]; absent names fail with [`AssetError::NotFound`].
pub trait AssetStore: Debug + Send + Sync {
    /// Opens a stream over the named asset.
    ///
    /// # Errors
    /// [`AssetError::NotFound`], [`AssetError::InvalidName`] or [`AssetError::Io`].
    fn open(&self, name: &str) -> Result<Box<dyn Read + Send>, AssetError>;

    /// Returns `true` when `name` is valid and refers to an existing asset.
    fn exists(&self, name: &str) -> bool;

    /// Reads the whole asset, dropping a leading UTF-8 byte order mark.
    ///
    /// # Errors
    /// Same as [`AssetStore::open`], plus [`AssetError::Io`] if the stream fails mid-read.
    fn read(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        let mut bytes = Vec::new();
        self.open(name)?.read_to_end(&mut bytes).context(format!("Failed to read asset: {name}"))?;

        if bytes.starts_with(UTF8_BOM) {
            bytes.drain(..UTF8_BOM.len());
        }
        Ok(bytes)
    }

    /// Reads the whole asset as UTF-8 text.
    ///
    /// # Errors
    /// Same as [`AssetStore::read`]; invalid UTF-8 is reported as an [`AssetError::Io`]
    /// of kind [`std::io::ErrorKind::InvalidData`].
    fn read_to_string(&self, name: &str) -> Result<String, AssetError> {
        String::from_utf8(self.read(name)?)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            .context(format!("Asset is not valid UTF-8: {name}"))
    }
}
