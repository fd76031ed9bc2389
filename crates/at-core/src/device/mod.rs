//! Device identity domain.

mod advertising;
mod identity;
pub mod keys;
mod platform;

pub use advertising::{AdvertisingIdOutcome, AdvertisingInfo, UnavailableReason};
pub use identity::{DeviceIdSource, DeviceIdentity};
pub use platform::Platform;
