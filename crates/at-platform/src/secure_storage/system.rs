use at_core::ports::{SecureStorageError, SecureStoragePort};
use keyring::Entry;

pub const DEFAULT_SERVICE_NAME: &str = "AppTools";

/// System keychain-backed secure storage.
///
/// On iOS the keychain outlives the app, so a mirrored device id survives
/// reinstall.
///
/// 基于系统钥匙串的安全存储实现。
#[derive(Debug, Clone)]
pub struct SystemSecureStorage {
    service: String,
}

impl SystemSecureStorage {
    pub fn new() -> Self {
        Self::with_service(DEFAULT_SERVICE_NAME)
    }

    /// Use a custom keychain service name (usually the bundle identifier).
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry_for_key(&self, key: &str) -> Result<Entry, SecureStorageError> {
        Entry::new(&self.service, key)
            .map_err(|e| SecureStorageError::Other(format!("failed to create keyring entry: {e}")))
    }
}

impl Default for SystemSecureStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn map_keyring_error(context: &str, err: keyring::Error) -> SecureStorageError {
    match err {
        keyring::Error::PlatformFailure(msg) => {
            SecureStorageError::PermissionDenied(msg.to_string())
        }
        keyring::Error::NoStorageAccess(msg) => SecureStorageError::Unavailable(msg.to_string()),
        keyring::Error::BadEncoding(_) => {
            SecureStorageError::Corrupt(format!("{context}: bad encoding"))
        }
        other => SecureStorageError::Other(format!("{context}: {other}")),
    }
}

impl SecureStoragePort for SystemSecureStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, SecureStorageError> {
        let entry = self.entry_for_key(key)?;
        match entry.get_secret() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(map_keyring_error("failed to read keychain", err)),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), SecureStorageError> {
        let entry = self.entry_for_key(key)?;
        entry
            .set_secret(value)
            .map_err(|err| map_keyring_error("failed to write keychain", err))
    }
}
