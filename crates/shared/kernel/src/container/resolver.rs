use super::{Container, ContainerError, Lifetime, Rule};
use apphost_domain::registry::ServiceKey;
use std::cell::RefCell;
use std::sync::Arc;
use tracing::debug;

/// Resolution context handed to factories.
///
/// One resolver lives for a single top-level [`Container::resolve`] call and tracks
/// the chain of services being built, so a dependency cycle is reported instead of
/// recursing forever.
#[derive(Debug)]
pub struct Resolver<'a> {
    container: &'a Container,
    path: RefCell<Vec<ServiceKey>>,
}

impl<'a> Resolver<'a> {
    pub(crate) const fn new(container: &'a Container) -> Self {
        Self { container, path: RefCell::new(Vec::new()) }
    }

    /// The container being resolved from.
    #[must_use]
    pub const fn container(&self) -> &'a Container {
        self.container
    }

    /// Resolves a dependency of the service currently being built.
    ///
    /// # Errors
    /// Same as [`Container::resolve`].
    pub fn resolve<T>(&self) -> Result<Arc<T>, ContainerError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let key = ServiceKey::of::<T>();
        let registration = self.container.registrations.get(&key.id()).ok_or_else(|| {
            ContainerError::Unregistered { message: key.name().into(), context: self.chain() }
        })?;

        let rule = registration.rule.downcast_ref::<Rule<T>>().ok_or_else(|| {
            ContainerError::TypeMismatch { message: key.name().into(), context: None }
        })?;

        match rule {
            Rule::Instance(instance) => Ok(Arc::clone(instance)),
            Rule::Factory { factory, lifetime, cache } => {
                if let Some(cached) = cache.get() {
                    return Ok(Arc::clone(cached));
                }

                self.enter(key)?;
                let built = factory(self);
                self.leave();
                let built = built?;

                debug!(service = %key, ?lifetime, "Activated service");
                match lifetime {
                    Lifetime::Singleton => Ok(Arc::clone(cache.get_or_init(|| built))),
                    Lifetime::Transient => Ok(built),
                }
            },
        }
    }

    fn enter(&self, key: ServiceKey) -> Result<(), ContainerError> {
        let mut path = self.path.borrow_mut();
        if path.contains(&key) {
            let cycle: Vec<_> =
                path.iter().chain(std::iter::once(&key)).map(ServiceKey::name).collect();
            return Err(ContainerError::CircularDependency {
                message: cycle.join(" -> ").into(),
                context: None,
            });
        }
        path.push(key);
        Ok(())
    }

    fn leave(&self) {
        self.path.borrow_mut().pop();
    }

    /// Names the service whose factory asked for the dependency being resolved.
    fn chain(&self) -> Option<std::borrow::Cow<'static, str>> {
        let path = self.path.borrow();
        let last = path.last()?;
        Some(format!("required by {last}").into())
    }
}
