//! Platform identity sources.
//!
//! One `PlatformIdentitySource` per platform family. Mobile sources delegate
//! native calls to a host-provided bridge (JNI / Objective-C glue lives in
//! the engine plugin, not here).

mod android;
mod desktop;
mod ios;

pub use android::{AdvertisingCallback, AndroidBridge, AndroidIdentitySource};
pub use desktop::DesktopIdentitySource;
pub use ios::{IosBridge, IosIdentitySource};

/// Raw answer of a native advertising identifier request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NativeAdvertisingAnswer {
    pub advertising_id: String,
    pub tracking_enabled: bool,
    /// Non-empty when the native request failed.
    pub error: Option<String>,
}
