//! Facade crate of the host.
//! Re-exports the asset, domain and kernel crates and provides the composition root.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Build the container once at startup with [`ServiceRegistry`].
//! - Pass the [`Container`](kernel::container::Container) to the code that needs it, or
//!   [`locator::install`] it when a process-wide lookup is unavoidable.
//!
//! ```rust
//! use apphost::ServiceRegistry;
//! use apphost::assets::MemoryAssetStore;
//! use apphost::domain::settings::AppSettings;
//! use std::sync::Arc;
//!
//! let assets = MemoryAssetStore::new()
//!     .with("appsettings.json", r#"{"ApiUrl": "https://example.com", "Timeout": 30}"#)?;
//!
//! let container = ServiceRegistry::new(Arc::new(assets)).configure().build()?;
//! let settings = container.resolve::<AppSettings>()?;
//!
//! assert_eq!(settings.api_url, "https://example.com");
//! assert_eq!(settings.timeout, 30);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod locator;
mod registry;

pub use apphost_assets as assets;
pub use apphost_domain as domain;
pub use apphost_kernel as kernel;
pub use registry::{Configured, ServiceRegistry, Unconfigured};
