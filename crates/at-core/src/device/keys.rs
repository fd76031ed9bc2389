//! Persisted store keys used by the device info component.
//!
//! The values are part of the on-device contract: changing them orphans
//! identifiers persisted by earlier installs.

/// Cached resolved device identifier (string).
pub const DEVICE_ID: &str = "DeviceInfo.DeviceId";

/// Presence flag; existence marks "not first launch anymore".
pub const FIRST_LAUNCH: &str = "DeviceInfo.FirstLaunch";
