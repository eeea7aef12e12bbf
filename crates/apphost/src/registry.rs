use apphost_assets::AssetStore;
use apphost_domain::settings::AppSettings;
use apphost_kernel::config::{ConfigLoader, LoaderOptions, SettingsManager};
use apphost_kernel::container::{Container, ContainerBuilder, ContainerError};
use private::Sealed;
use std::sync::Arc;
use tracing::debug;

/// Nothing registered yet; only the host-provided asset store is known.
#[derive(Debug)]
pub struct Unconfigured(Arc<dyn AssetStore>);
/// Host services registered; application services may be added before building.
#[derive(Debug)]
pub struct Configured(ContainerBuilder);

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for Unconfigured {}
impl Sealed for Configured {}

/// The composition root.
///
/// `new` -> [`configure`](ServiceRegistry::configure) ->
/// [`build`](ServiceRegistry::build). Each step consumes the previous state, so
/// building twice or building before configuring does not compile, and services
/// can only be resolved from the resulting [`Container`].
#[allow(private_bounds)]
#[derive(Debug)]
pub struct ServiceRegistry<S: Sealed = Unconfigured> {
    state: S,
}

impl ServiceRegistry<Unconfigured> {
    #[must_use = "The registry must be configured and built"]
    pub fn new(assets: Arc<dyn AssetStore>) -> Self {
        Self { state: Unconfigured(assets) }
    }

    /// Registers the host services with the plain loader (no overlay, no overrides).
    #[must_use = "The registry must be built"]
    pub fn configure(self) -> ServiceRegistry<Configured> {
        self.configure_with(LoaderOptions::default())
    }

    /// Registers the host services, in dependency order:
    ///
    /// 1. `dyn AssetStore`: the injected store, as an instance.
    /// 2. `dyn SettingsManager`: a singleton [`ConfigLoader`] over the resolved store.
    /// 3. [`AppSettings`]: a singleton that calls `load_settings`. Nothing is read
    ///    until it is first resolved.
    #[must_use = "The registry must be built"]
    pub fn configure_with(self, options: LoaderOptions) -> ServiceRegistry<Configured> {
        let Unconfigured(assets) = self.state;
        let mut builder = ContainerBuilder::new();

        builder.instance::<dyn AssetStore>(assets);
        builder.singleton::<dyn SettingsManager, _>(move |resolver| {
            let assets = resolver.resolve::<dyn AssetStore>()?;
            let loader: Arc<dyn SettingsManager> =
                Arc::new(ConfigLoader::with_options(assets, options.clone()));
            Ok(loader)
        });
        builder.singleton::<AppSettings, _>(|resolver| {
            let settings = resolver.resolve::<dyn SettingsManager>()?.load_settings()?;
            Ok(Arc::new(settings))
        });

        debug!("Host services registered");
        ServiceRegistry { state: Configured(builder) }
    }
}

impl ServiceRegistry<Configured> {
    /// Adds application services next to the host ones.
    ///
    /// ```rust
    /// use apphost::ServiceRegistry;
    /// use apphost::assets::MemoryAssetStore;
    /// use apphost::domain::settings::AppSettings;
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// # let assets = MemoryAssetStore::new()
    /// #     .with("appsettings.json", r#"{"ApiUrl": "https://example.com", "Timeout": 30}"#)?;
    /// let container = ServiceRegistry::new(Arc::new(assets))
    ///     .configure()
    ///     .register(|services| {
    ///         services.singleton::<Duration, _>(|resolver| {
    ///             Ok(Arc::new(resolver.resolve::<AppSettings>()?.timeout()))
    ///         });
    ///     })
    ///     .build()?;
    ///
    /// assert_eq!(*container.resolve::<Duration>()?, Duration::from_secs(30));
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[must_use = "The registry must be built"]
    pub fn register(mut self, services: impl FnOnce(&mut ContainerBuilder)) -> Self {
        services(&mut self.state.0);
        self
    }

    /// Freezes the registrations.
    ///
    /// # Errors
    /// Returns [`ContainerError::DuplicateRegistration`] if an application service
    /// was registered under a capability that already has a rule.
    pub fn build(self) -> Result<Container, ContainerError> {
        self.state.0.build()
    }
}
