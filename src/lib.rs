//! # apptools
//!
//! Device identity for game engine apps: a stable device id persisted across
//! launches, the platform vendor and advertising ids, and a first-launch
//! flag, resolved once and exposed both as a future and as a pollable
//! [`AsyncOperation`].
//!
//! ```ignore
//! let config = apptools::bootstrap::config::load_config("apptools.toml".into())?;
//! apptools::bootstrap::tracing::init_tracing_subscriber(&config)?;
//!
//! let device_info = apptools::bootstrap::wiring::build_default_device_info(&config)?;
//! let identity = device_info.get().await?;
//! println!("{}", identity.device_id());
//! ```

pub mod bootstrap;

pub use at_app::{DeviceInfo, ResolveDeviceIdentity, ResolveDeviceIdentityError};
pub use at_core::{
    AppConfig, AsyncOperation, DeviceIdentity, InvalidResultAccess, OperationStatus, Platform,
};
