use async_trait::async_trait;

use crate::device::{AdvertisingIdOutcome, Platform};

/// Platform-native identity queries.
///
/// One implementation per platform family, selected at initialization. The
/// resolution chain only talks to this trait, never to platform APIs.
#[async_trait]
pub trait PlatformIdentitySource: Send + Sync {
    /// Platform family this source belongs to.
    fn platform(&self) -> Platform;

    /// Query the advertising identifier.
    ///
    /// Must complete in finite time. Failures are reported as
    /// `AdvertisingIdOutcome::Unavailable`, never as errors.
    async fn advertising_id(&self) -> AdvertisingIdOutcome;

    /// Platform vendor identifier, `None` when the platform exposes none.
    fn vendor_id(&self) -> Option<String>;
}
