use std::borrow::Cow;
use std::error::Error;

/// Errors raised while building the container or resolving a service.
#[apphost_derive::apphost_error]
pub enum ContainerError {
    /// No container has been installed as the process-wide handle yet.
    #[error("Container not initialized{}: {message}", format_context(.context))]
    NotInitialized { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Container already initialized{}: {message}", format_context(.context))]
    AlreadyInitialized { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Service not registered{}: {message}", format_context(.context))]
    Unregistered { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Service registered more than once{}: {message}", format_context(.context))]
    DuplicateRegistration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Circular dependency{}: {message}", format_context(.context))]
    CircularDependency { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Registration type mismatch{}: {message}", format_context(.context))]
    TypeMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A factory failed while building a service or one of its dependencies.
    #[error("Service activation failed{}: {source}", format_context(.context))]
    Activation { source: Box<dyn Error + Send + Sync>, context: Option<Cow<'static, str>> },
}

impl ContainerError {
    /// Wraps any error raised by a factory.
    pub fn activation(source: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::Activation { source: source.into(), context: None }
    }

    /// Finds the first error of type `E` in the source chain, this error included.
    ///
    /// ```rust
    /// use apphost_kernel::prelude::*;
    ///
    /// let err = ContainerError::from(ConfigError::from("broken"));
    /// assert!(matches!(err.find_source::<ConfigError>(), Some(ConfigError::Internal { .. })));
    /// ```
    #[must_use]
    pub fn find_source<E: Error + 'static>(&self) -> Option<&E> {
        let mut current: Option<&(dyn Error + 'static)> = Some(self);
        while let Some(error) = current {
            if let Some(found) = error.downcast_ref::<E>() {
                return Some(found);
            }
            current = error.source();
        }
        None
    }
}

impl From<crate::config::ConfigError> for ContainerError {
    fn from(source: crate::config::ConfigError) -> Self {
        Self::Activation { source: Box::new(source), context: Some("Settings".into()) }
    }
}
