//! Read-only stores of bundled application assets.
//!
//! The host reads its configuration and other resources through the [`AssetStore`]
//! capability rather than from fixed filesystem paths, so the same startup code can
//! serve assets from a directory next to the binary, from bytes embedded at compile
//! time, or from fixtures in tests.
//!
//! - [`DirAssetStore`]: a directory on disk; every name is resolved against the
//!   canonical root and may not escape it (`..`, absolute names, outbound symlinks).
//! - [`MemoryAssetStore`]: an in-memory name -> bytes map.
//!
//! ```rust
//! use apphost_assets::{AssetError, AssetStore, MemoryAssetStore};
//!
//! let store = MemoryAssetStore::new().with("appsettings.json", "\u{feff}{}")?;
//! assert_eq!(store.read_to_string("appsettings.json")?, "{}");
//! assert!(matches!(store.open("missing.json"), Err(AssetError::NotFound { .. })));
//! # Ok::<(), AssetError>(())
//! ```

mod builder;
mod dir;
mod error;
mod memory;
mod security;
mod store;

pub use builder::DirAssetStoreBuilder;
pub use dir::DirAssetStore;
pub use error::{AssetError, AssetErrorExt};
pub use memory::MemoryAssetStore;
pub use store::AssetStore;
