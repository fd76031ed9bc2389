//! Secure storage selection and default factory.

mod file;
mod system;

use std::path::Path;
use std::sync::Arc;

use at_core::ports::SecureStoragePort;

use crate::capability::SecureStorageCapability;

pub use file::FileSecureStorage;
pub use system::{SystemSecureStorage, DEFAULT_SERVICE_NAME};

#[derive(Debug, thiserror::Error)]
pub enum SecureStorageFactoryError {
    #[error("secure storage unsupported: {capability:?}")]
    Unsupported { capability: SecureStorageCapability },

    #[error("failed to initialize file-based secure storage: {0}")]
    FileBasedInit(#[from] std::io::Error),
}

/// Build the secure storage matching `capability`.
///
/// `service` names the keychain service (empty selects the default);
/// `app_data_root` hosts the file-based fallback.
pub fn create_secure_storage(
    capability: SecureStorageCapability,
    service: &str,
    app_data_root: &Path,
) -> Result<Arc<dyn SecureStoragePort>, SecureStorageFactoryError> {
    match capability {
        SecureStorageCapability::SystemKeyring => {
            log::info!("Using system keychain for device id mirror");
            let storage = if service.is_empty() {
                SystemSecureStorage::new()
            } else {
                SystemSecureStorage::with_service(service)
            };
            Ok(Arc::new(storage) as Arc<dyn SecureStoragePort>)
        }
        SecureStorageCapability::FileBasedKeystore => {
            log::warn!("Using file-based secure storage (WSL/headless fallback)");
            Ok(Arc::new(FileSecureStorage::new_in_app_data_root(app_data_root)?)
                as Arc<dyn SecureStoragePort>)
        }
        SecureStorageCapability::Unsupported => {
            log::warn!("Secure storage unsupported on this platform");
            Err(SecureStorageFactoryError::Unsupported { capability })
        }
    }
}
