//! Device identity use cases
//!
//! ResolveDeviceIdentity
//!   ├── PlatformIdentitySource::advertising_id   (await)
//!   ├── ResolveDeviceId                          (chain + write-back)
//!   └── CheckFirstLaunch                         (check-and-set)

pub mod check_first_launch;
pub mod resolve_device_id;
pub mod resolve_device_identity;

pub use check_first_launch::CheckFirstLaunch;
pub use resolve_device_id::{ResolveDeviceId, ResolvedDeviceId};
pub use resolve_device_identity::{ResolveDeviceIdentity, ResolveDeviceIdentityError};
