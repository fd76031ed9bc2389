use async_trait::async_trait;
use at_core::device::{AdvertisingIdOutcome, Platform, UnavailableReason};
use at_core::ports::PlatformIdentitySource;
use tokio::sync::oneshot;

use super::NativeAdvertisingAnswer;

/// Completion callback handed to the native advertising id request.
pub type AdvertisingCallback = Box<dyn FnOnce(NativeAdvertisingAnswer) + Send + 'static>;

/// Native Android queries, implemented by the host engine plugin.
pub trait AndroidBridge: Send + Sync {
    /// `Settings.Secure.ANDROID_ID` read through the activity's content
    /// resolver. Avoids `READ_PHONE_STATE`, unlike IMEI-based ids.
    fn secure_android_id(&self) -> Option<String>;

    /// Start an asynchronous advertising id request.
    ///
    /// Returns `false` when the request cannot be made (no Play Services);
    /// the callback is then never invoked. Otherwise the callback fires
    /// exactly once, on any thread. `tracking_enabled` must already be the
    /// inverse of `isLimitAdTrackingEnabled`.
    fn request_advertising_id(&self, callback: AdvertisingCallback) -> bool;
}

/// Android identity source bridging the callback-based advertising id API
/// into a future.
pub struct AndroidIdentitySource<B> {
    bridge: B,
}

impl<B: AndroidBridge> AndroidIdentitySource<B> {
    pub fn new(bridge: B) -> Self {
        Self { bridge }
    }
}

#[async_trait]
impl<B: AndroidBridge> PlatformIdentitySource for AndroidIdentitySource<B> {
    fn platform(&self) -> Platform {
        Platform::Android
    }

    async fn advertising_id(&self) -> AdvertisingIdOutcome {
        let (tx, rx) = oneshot::channel();
        let accepted = self.bridge.request_advertising_id(Box::new(move |answer| {
            // Receiver gone means the resolution was dropped; nothing to do.
            let _ = tx.send(answer);
        }));

        if !accepted {
            tracing::debug!("Advertising id request not supported by the bridge");
            return AdvertisingIdOutcome::Unavailable(UnavailableReason::Unsupported);
        }

        match rx.await {
            Ok(answer) => AdvertisingIdOutcome::from_native(
                &answer.advertising_id,
                answer.tracking_enabled,
                answer.error.as_deref(),
            ),
            Err(_) => AdvertisingIdOutcome::Unavailable(UnavailableReason::Dropped),
        }
    }

    fn vendor_id(&self) -> Option<String> {
        self.bridge.secure_android_id().filter(|id| !id.is_empty())
    }
}
