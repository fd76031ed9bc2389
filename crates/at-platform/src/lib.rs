//! # at-platform
//!
//! Platform-specific implementations for AppTools device info.
//!
//! This crate contains the adapters that talk to the operating system or to
//! the host engine's native bridge: identity sources and secure storage.

pub mod capability;
pub mod secure_storage;
pub mod sources;

pub use capability::{detect_platform, detect_storage_capability, SecureStorageCapability};
pub use secure_storage::{create_secure_storage, FileSecureStorage, SystemSecureStorage};
pub use sources::{
    AdvertisingCallback, AndroidBridge, AndroidIdentitySource, DesktopIdentitySource,
    IosBridge, IosIdentitySource, NativeAdvertisingAnswer,
};
