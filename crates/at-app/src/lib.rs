//! AppTools Application Orchestration Layer
//!
//! This crate contains the device identity use cases and the memoizing
//! `DeviceInfo` service built on top of them.

pub mod deps;
pub mod device_info;
pub mod usecases;

pub use deps::DeviceInfoDeps;
pub use device_info::DeviceInfo;
pub use usecases::{
    CheckFirstLaunch, ResolveDeviceId, ResolveDeviceIdentity, ResolveDeviceIdentityError,
    ResolvedDeviceId,
};
