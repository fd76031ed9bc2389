use async_trait::async_trait;
use at_core::device::{AdvertisingIdOutcome, Platform};
use at_core::ports::PlatformIdentitySource;

/// Native iOS queries, implemented by the host engine plugin.
pub trait IosBridge: Send + Sync {
    /// `ASIdentifierManager.advertisingIdentifier`.
    fn advertising_identifier(&self) -> String;

    /// Whether the user allows ad tracking.
    fn advertising_tracking_enabled(&self) -> bool;

    /// `UIDevice.identifierForVendor`, `None` before first unlock.
    fn vendor_identifier(&self) -> Option<String>;
}

/// iOS identity source. All answers are synchronous on iOS.
pub struct IosIdentitySource<B> {
    bridge: B,
}

impl<B: IosBridge> IosIdentitySource<B> {
    pub fn new(bridge: B) -> Self {
        Self { bridge }
    }
}

#[async_trait]
impl<B: IosBridge> PlatformIdentitySource for IosIdentitySource<B> {
    fn platform(&self) -> Platform {
        Platform::IOS
    }

    async fn advertising_id(&self) -> AdvertisingIdOutcome {
        AdvertisingIdOutcome::from_native(
            &self.bridge.advertising_identifier(),
            self.bridge.advertising_tracking_enabled(),
            None,
        )
    }

    fn vendor_id(&self) -> Option<String> {
        self.bridge.vendor_identifier().filter(|id| !id.is_empty())
    }
}
