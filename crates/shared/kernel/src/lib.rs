//! Kernel of the host.
//!
//! - [`container`]: the service container. Capabilities are registered once at
//!   startup as instances or factories and resolved lazily by type.
//! - [`config`]: loads `appsettings.json` from the injected asset store into
//!   [`AppSettings`](apphost_domain::settings::AppSettings), with optional
//!   environment overlay and environment variable overrides.
//!
//! ```rust
//! use apphost_kernel::prelude::*;
//! use std::sync::Arc;
//!
//! let mut builder = Container::builder();
//! builder.instance::<String>(Arc::new("hello".to_owned()));
//! builder.singleton::<usize, _>(|resolver| Ok(Arc::new(resolver.resolve::<String>()?.len())));
//! let container = builder.build()?;
//!
//! assert_eq!(*container.resolve::<usize>()?, 5);
//! # Ok::<(), ContainerError>(())
//! ```

pub mod config;
pub mod container;
pub mod prelude;

pub use apphost_assets as assets;
pub use apphost_domain as domain;
