//! Service container.
//!
//! A [`ContainerBuilder`] collects one construction rule per capability type and
//! is frozen into an immutable [`Container`]. Capabilities are keyed by type, so
//! trait objects (`dyn AssetStore`) and concrete types (`AppSettings`) alike can be
//! registered and resolved.
//!
//! Rules are either ready instances or factories. A factory receives a
//! [`Resolver`] to pull its own dependencies, which is how registration order
//! becomes irrelevant: dependencies are resolved lazily, on first use, and a chain
//! that loops back on itself fails with [`ContainerError::CircularDependency`].
//!
//! Singleton factories run at most once per successful resolution race and their
//! result is cached; the first value stored wins and every caller receives it.
//! Failed activations are not cached.

mod builder;
mod error;
mod resolver;

pub use builder::ContainerBuilder;
pub use error::{ContainerError, ContainerErrorExt};
pub use resolver::Resolver;

use apphost_domain::registry::ServiceKey;
use fxhash::FxHashMap;
use std::any::{Any, TypeId};
use std::fmt;
use std::ops::Deref;
use std::sync::{Arc, OnceLock};

/// How long a factory-built service lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifetime {
    /// Built once on first resolution and shared afterwards.
    Singleton,
    /// Built again on every resolution.
    Transient,
}

pub(crate) enum Rule<T: ?Sized + 'static> {
    Instance(Arc<T>),
    Factory {
        factory: Box<dyn Fn(&Resolver<'_>) -> Result<Arc<T>, ContainerError> + Send + Sync>,
        lifetime: Lifetime,
        cache: OnceLock<Arc<T>>,
    },
}

/// A type-erased [`Rule`] plus what diagnostics need to know about it.
pub(crate) struct Registration {
    pub(crate) key: ServiceKey,
    pub(crate) lifetime: Option<Lifetime>,
    pub(crate) rule: Box<dyn Any + Send + Sync>,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("key", &self.key)
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct ContainerInner {
    pub(crate) registrations: FxHashMap<TypeId, Registration>,
}

/// The built, immutable service container.
///
/// The handle is reference-counted: clones share the same registrations and
/// singleton caches. It is `Send + Sync`, so one container can serve every thread.
#[derive(Debug, Clone)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

impl Deref for Container {
    type Target = ContainerInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Container {
    #[must_use]
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    pub(crate) fn from_registrations(registrations: FxHashMap<TypeId, Registration>) -> Self {
        Self { inner: Arc::new(ContainerInner { registrations }) }
    }

    /// Resolves the service registered for `T`.
    ///
    /// # Errors
    /// - [`ContainerError::Unregistered`] if `T` (or one of its dependencies) has no rule.
    /// - [`ContainerError::CircularDependency`] if building `T` requires `T` again.
    /// - [`ContainerError::Activation`] if a factory in the chain failed.
    pub fn resolve<T>(&self) -> Result<Arc<T>, ContainerError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        Resolver::new(self).resolve::<T>()
    }

    #[must_use]
    pub fn is_registered<T: ?Sized + 'static>(&self) -> bool {
        self.registrations.contains_key(&TypeId::of::<T>())
    }

    /// Iterates over the registered capabilities (for diagnostics).
    pub fn services(&self) -> impl Iterator<Item = ServiceKey> + '_ {
        self.registrations.values().map(|registration| registration.key)
    }

    /// Lifetime of a registered factory; `None` for instances and unknown types.
    #[must_use]
    pub fn lifetime_of<T: ?Sized + 'static>(&self) -> Option<Lifetime> {
        self.registrations.get(&TypeId::of::<T>()).and_then(|registration| registration.lifetime)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}
