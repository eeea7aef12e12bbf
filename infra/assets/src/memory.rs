//! Assets held in memory, e.g. embedded with `include_bytes!` or built in tests.

use crate::error::AssetError;
use crate::security::normalize_name;
use crate::store::AssetStore;
use fxhash::FxHashMap;
use std::io::{Cursor, Read};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// An [`AssetStore`] over an in-memory name -> bytes map.
///
/// Names are normalized on insert and on lookup, so `./a.json` and `a.json`
/// refer to the same asset.
#[derive(Debug, Default)]
pub struct MemoryAssetStore {
    assets: FxHashMap<String, Arc<[u8]>>,
    opens: AtomicUsize,
}

impl MemoryAssetStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an asset, replacing any previous content under the same name.
    ///
    /// # Errors
    /// [`AssetError::InvalidName`] if the name is empty, absolute or escapes the root.
    pub fn insert(&mut self, name: &str, bytes: impl Into<Vec<u8>>) -> Result<(), AssetError> {
        let key = normalize_name(name)?;
        self.assets.insert(key, Arc::from(bytes.into()));
        Ok(())
    }

    /// Builder-style [`MemoryAssetStore::insert`].
    ///
    /// # Errors
    /// Same as [`MemoryAssetStore::insert`].
    pub fn with(mut self, name: &str, bytes: impl Into<Vec<u8>>) -> Result<Self, AssetError> {
        self.insert(name, bytes)?;
        Ok(self)
    }

    /// Number of successful [`AssetStore::open`] calls so far.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.opens.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl AssetStore for MemoryAssetStore {
    fn open(&self, name: &str) -> Result<Box<dyn Read + Send>, AssetError> {
        let key = normalize_name(name)?;
        let bytes = self.assets.get(&key).cloned().ok_or_else(|| AssetError::not_found(name))?;

        self.opens.fetch_add(1, Ordering::Relaxed);
        debug!(asset = name, size = bytes.len(), "Opening in-memory asset");
        Ok(Box::new(Cursor::new(bytes)))
    }

    fn exists(&self, name: &str) -> bool {
        normalize_name(name).is_ok_and(|key| self.assets.contains_key(&key))
    }
}
