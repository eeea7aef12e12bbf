use crate::dir::{DirAssetStore, DirAssetStoreInner};
use crate::error::{AssetError, AssetErrorExt};
use private::Sealed;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Default)]
pub struct NoRoot;
#[derive(Debug)]
pub struct WithRoot(PathBuf);

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoRoot {}
impl Sealed for WithRoot {}

/// Fluent builder for [`DirAssetStore`]; a root directory is mandatory.
#[allow(private_bounds)]
#[derive(Debug, Default)]
pub struct DirAssetStoreBuilder<S: Sealed = NoRoot> {
    state: S,
}

impl DirAssetStoreBuilder<NoRoot> {
    #[must_use = "Creates a new asset store builder"]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "Sets the directory the assets are served from"]
    pub fn root(self, path: impl Into<PathBuf>) -> DirAssetStoreBuilder<WithRoot> {
        DirAssetStoreBuilder { state: WithRoot(path.into()) }
    }
}

impl DirAssetStoreBuilder<WithRoot> {
    /// Resolves the root directory and returns the store.
    ///
    /// The root is canonicalized once so that every lookup can be checked against
    /// the physical directory, which keeps symlinks from escaping the sandbox.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::Io`] if the root cannot be resolved, or
    /// [`AssetError::NotFound`] if it exists but is not a directory.
    pub fn open(self) -> Result<DirAssetStore, AssetError> {
        let root = &self.state.0;

        let canonical = fs::canonicalize(root)
            .context(format!("Failed to resolve asset root: {}", root.display()))?;

        if !canonical.is_dir() {
            return Err(AssetError::NotFound {
                message: canonical.display().to_string().into(),
                context: Some("Asset root is not a directory".into()),
            });
        }

        info!(path = %canonical.display(), "Opened asset directory");
        Ok(DirAssetStore { inner: Arc::new(DirAssetStoreInner { root: canonical }) })
    }
}
