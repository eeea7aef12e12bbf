use super::{Container, ContainerError, Lifetime, Registration, Resolver, Rule};
use apphost_domain::registry::ServiceKey;
use fxhash::FxHashMap;
use std::any::TypeId;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info};

/// Collects construction rules before the container is frozen.
///
/// Registering the same capability twice is not an error at the call site; it is
/// recorded and reported by [`ContainerBuilder::build`], so a composition root
/// either builds with exactly one rule per capability or not at all.
#[derive(Debug, Default)]
pub struct ContainerBuilder {
    registrations: FxHashMap<TypeId, Registration>,
    duplicates: Vec<ServiceKey>,
}

impl ContainerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an already-built instance.
    pub fn instance<T>(&mut self, instance: Arc<T>) -> &mut Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.insert::<T>(None, Rule::Instance(instance))
    }

    /// Registers a factory whose result is cached after the first successful call.
    pub fn singleton<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&Resolver<'_>) -> Result<Arc<T>, ContainerError> + Send + Sync + 'static,
    {
        self.factory::<T, F>(Lifetime::Singleton, factory)
    }

    /// Registers a factory that runs on every resolution.
    pub fn transient<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&Resolver<'_>) -> Result<Arc<T>, ContainerError> + Send + Sync + 'static,
    {
        self.factory::<T, F>(Lifetime::Transient, factory)
    }

    pub fn factory<T, F>(&mut self, lifetime: Lifetime, factory: F) -> &mut Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&Resolver<'_>) -> Result<Arc<T>, ContainerError> + Send + Sync + 'static,
    {
        let rule: Rule<T> =
            Rule::Factory { factory: Box::new(factory), lifetime, cache: OnceLock::new() };
        self.insert::<T>(Some(lifetime), rule)
    }

    #[must_use]
    pub fn is_registered<T: ?Sized + 'static>(&self) -> bool {
        self.registrations.contains_key(&TypeId::of::<T>())
    }

    fn insert<T>(&mut self, lifetime: Option<Lifetime>, rule: Rule<T>) -> &mut Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let key = ServiceKey::of::<T>();

        if self.registrations.contains_key(&key.id()) {
            debug!(service = %key, "Duplicate registration recorded");
            self.duplicates.push(key);
        } else {
            debug!(service = %key, ?lifetime, "Registered service");
            let registration = Registration { key, lifetime, rule: Box::new(rule) };
            self.registrations.insert(key.id(), registration);
        }
        self
    }

    /// Freezes the registrations into a [`Container`].
    ///
    /// # Errors
    /// Returns [`ContainerError::DuplicateRegistration`] naming every capability that
    /// was registered more than once.
    pub fn build(self) -> Result<Container, ContainerError> {
        if !self.duplicates.is_empty() {
            let names: Vec<_> = self.duplicates.iter().map(ServiceKey::name).collect();
            return Err(ContainerError::DuplicateRegistration {
                message: names.join(", ").into(),
                context: None,
            });
        }

        info!(services = self.registrations.len(), "Service container built");
        Ok(Container::from_registrations(self.registrations))
    }
}
