//! # at-core
//!
//! Core domain models and port interfaces for AppTools device info.
//!
//! This crate contains pure domain logic without any infrastructure dependencies.

pub mod config;
pub mod device;
pub mod operation;
pub mod ports;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use device::{
    AdvertisingIdOutcome, AdvertisingInfo, DeviceIdSource, DeviceIdentity, Platform,
    UnavailableReason,
};
pub use operation::{AsyncOperation, InvalidResultAccess, OperationCompleter, OperationStatus};
