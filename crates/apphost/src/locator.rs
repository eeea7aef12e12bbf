//! Process-wide container handle.
//!
//! Prefer passing the [`Container`] explicitly. This handle exists for code that
//! cannot receive it, e.g. callbacks invoked by a host framework.
//!
//! Lifecycle: [`install`] once after the container is built, [`resolve`] from
//! anywhere, [`teardown`] at shutdown. Resolving before `install` (or after
//! `teardown`) fails with [`ContainerError::NotInitialized`].

use apphost_kernel::container::{Container, ContainerError};
use parking_lot::{RwLock, const_rwlock};
use std::sync::Arc;
use tracing::info;

static CONTAINER: RwLock<Option<Container>> = const_rwlock(None);

/// Installs the process-wide container.
///
/// # Errors
/// Returns [`ContainerError::AlreadyInitialized`] if one is installed already; the
/// installed container is left untouched.
pub fn install(container: Container) -> Result<(), ContainerError> {
    let mut slot = CONTAINER.write();
    if slot.is_some() {
        return Err(ContainerError::AlreadyInitialized {
            message: "A container is already installed".into(),
            context: Some("Call locator::teardown before installing another one".into()),
        });
    }

    info!(services = container.len(), "Installed process-wide container");
    *slot = Some(container);
    Ok(())
}

/// Returns a handle to the installed container.
///
/// # Errors
/// Returns [`ContainerError::NotInitialized`] if nothing is installed.
pub fn current() -> Result<Container, ContainerError> {
    CONTAINER.read().clone().ok_or_else(|| ContainerError::NotInitialized {
        message: "No container installed".into(),
        context: Some("Call locator::install after building the service registry".into()),
    })
}

/// Resolves `T` from the installed container.
///
/// The lock is released before resolution, so factories may use the locator too.
///
/// # Errors
/// [`ContainerError::NotInitialized`] before [`install`], otherwise the errors of
/// [`Container::resolve`].
pub fn resolve<T>() -> Result<Arc<T>, ContainerError>
where
    T: ?Sized + Send + Sync + 'static,
{
    current()?.resolve::<T>()
}

#[must_use]
pub fn is_installed() -> bool {
    CONTAINER.read().is_some()
}

/// Removes and returns the installed container.
pub fn teardown() -> Option<Container> {
    let container = CONTAINER.write().take();
    if container.is_some() {
        info!("Process-wide container torn down");
    }
    container
}
