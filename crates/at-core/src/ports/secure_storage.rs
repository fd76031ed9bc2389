use thiserror::Error;

/// Secure storage errors.
///
/// 安全存储错误类型。
#[derive(Debug, Error)]
pub enum SecureStorageError {
    /// Secure storage is unavailable on this platform.
    ///
    /// 平台不支持或不可用。
    #[error("secure storage unavailable: {0}")]
    Unavailable(String),

    /// Access was denied by the platform (permissions/ACL).
    ///
    /// 平台权限或 ACL 拒绝访问。
    #[error("secure storage access denied: {0}")]
    PermissionDenied(String),

    /// Stored data is corrupt or invalid.
    #[error("secure storage data corrupt: {0}")]
    Corrupt(String),

    /// Other storage failures.
    #[error("secure storage failed: {0}")]
    Other(String),
}

/// Secure storage port (keychain-style), surviving app reinstall where the
/// platform allows it.
///
/// 安全存储端口：在平台支持时可跨重装保留数据。
pub trait SecureStoragePort: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, SecureStorageError>;

    /// Set a value by key.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), SecureStorageError>;
}
