//! Memoizing device info service.

use std::sync::Arc;

use at_core::device::DeviceIdentity;
use at_core::operation::AsyncOperation;
use tokio::sync::OnceCell;

use crate::usecases::{ResolveDeviceIdentity, ResolveDeviceIdentityError};

/// Resolves the device identity once per process and hands out the cached
/// value afterwards.
///
/// Concurrent callers of [`DeviceInfo::get`] share a single resolution, which
/// keeps the store's read-modify-write sequence serialized. A failed
/// resolution is not cached; the next call retries.
pub struct DeviceInfo {
    resolver: Arc<ResolveDeviceIdentity>,
    identity: Arc<OnceCell<DeviceIdentity>>,
}

impl DeviceInfo {
    pub fn new(resolver: ResolveDeviceIdentity) -> Self {
        Self {
            resolver: Arc::new(resolver),
            identity: Arc::new(OnceCell::new()),
        }
    }

    /// Resolved identity, resolving on first use.
    pub async fn get(&self) -> Result<&DeviceIdentity, ResolveDeviceIdentityError> {
        self.identity
            .get_or_try_init(|| self.resolver.execute())
            .await
    }

    /// Identity if a previous call already resolved it.
    pub fn cached(&self) -> Option<&DeviceIdentity> {
        self.identity.get()
    }

    /// Pollable variant of [`DeviceInfo::get`] for frame-driven callers.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn start(&self) -> AsyncOperation<DeviceIdentity, ResolveDeviceIdentityError> {
        if let Some(identity) = self.identity.get() {
            return AsyncOperation::from_result(Ok(identity.clone()));
        }

        let (operation, completer) = AsyncOperation::pending();
        let resolver = Arc::clone(&self.resolver);
        let identity = Arc::clone(&self.identity);

        tokio::spawn(async move {
            match identity.get_or_try_init(|| resolver.execute()).await {
                Ok(identity) => completer.try_set_result(identity.clone()),
                Err(err) => completer.try_set_error(err),
            };
        });

        operation
    }
}
