//! Assets served from a directory on disk.

use crate::builder::DirAssetStoreBuilder;
use crate::error::{AssetError, AssetErrorExt};
use crate::security;
use crate::store::AssetStore;
use std::fs::File;
use std::io::Read;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug)]
pub struct DirAssetStoreInner {
    /// Canonical physical path every asset name is resolved against.
    pub(crate) root: PathBuf,
}

/// An [`AssetStore`] backed by a directory, sandboxed to its root.
///
/// The handle is reference-counted and cheap to clone.
///
/// ```rust
/// use apphost_assets::{AssetStore, DirAssetStore};
///
/// # let tmp = tempfile::tempdir().unwrap();
/// # std::fs::write(tmp.path().join("appsettings.json"), "{}").unwrap();
/// let store = DirAssetStore::builder().root(tmp.path()).open()?;
/// assert_eq!(store.read_to_string("appsettings.json")?, "{}");
/// assert!(store.open("../outside.json").is_err());
/// # Ok::<(), apphost_assets::AssetError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DirAssetStore {
    pub(crate) inner: Arc<DirAssetStoreInner>,
}

impl Deref for DirAssetStore {
    type Target = DirAssetStoreInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DirAssetStore {
    #[must_use = "Creates a new asset store builder"]
    pub fn builder() -> DirAssetStoreBuilder {
        DirAssetStoreBuilder::new()
    }

    /// The canonical root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves an asset name to its physical path, enforcing the sandbox.
    ///
    /// # Errors
    /// [`AssetError::InvalidName`] for names outside the root, [`AssetError::NotFound`]
    /// if nothing exists at the path.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, AssetError> {
        security::resolve_path(&self.root, name)
    }
}

impl AssetStore for DirAssetStore {
    fn open(&self, name: &str) -> Result<Box<dyn Read + Send>, AssetError> {
        let path = self.resolve(name)?;
        if !path.is_file() {
            return Err(AssetError::not_found(name));
        }

        debug!(asset = name, path = %path.display(), "Opening asset");
        let file = File::open(&path).context(format!("Failed to open asset: {name}"))?;
        Ok(Box::new(file))
    }

    fn exists(&self, name: &str) -> bool {
        self.resolve(name).is_ok_and(|path| path.is_file())
    }
}
