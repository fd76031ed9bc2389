use thiserror::Error;

/// Persisted key-value store errors.
#[derive(Debug, Error)]
pub enum KeyValueStoreError {
    /// The backing storage could not be read.
    #[error("store read failed: {0}")]
    Read(String),

    /// The backing storage could not be written.
    #[error("store write failed: {0}")]
    Write(String),

    /// Stored data exists but cannot be parsed.
    #[error("store data corrupt: {0}")]
    Corrupt(String),
}

/// Installation-scoped string key-value store (engine preferences).
///
/// Writes may be buffered until `flush`. The store is process-local and
/// single-writer; callers serialize read-modify-write sequences.
pub trait KeyValueStorePort: Send + Sync {
    /// Get a string value by key.
    fn get_string(&self, key: &str) -> Result<Option<String>, KeyValueStoreError>;

    /// Set a string value by key.
    fn set_string(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError>;

    /// Whether a key is present, whatever its value.
    fn has_key(&self, key: &str) -> Result<bool, KeyValueStoreError>;

    /// Persist buffered writes.
    fn flush(&self) -> Result<(), KeyValueStoreError>;
}

#[cfg(test)]
mockall::mock! {
    pub KeyValueStore {}

    impl KeyValueStorePort for KeyValueStore {
        fn get_string(&self, key: &str) -> Result<Option<String>, KeyValueStoreError>;
        fn set_string(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError>;
        fn has_key(&self, key: &str) -> Result<bool, KeyValueStoreError>;
        fn flush(&self) -> Result<(), KeyValueStoreError>;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    #[test]
    fn mock_store_can_be_used_as_trait_object() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get_string()
            .with(eq("DeviceInfo.DeviceId"))
            .returning(|_| Ok(Some("abc".to_string())));

        let store: Box<dyn KeyValueStorePort> = Box::new(store);
        assert_eq!(
            store.get_string("DeviceInfo.DeviceId").unwrap().as_deref(),
            Some("abc")
        );
    }

    #[test]
    fn error_messages_name_the_operation() {
        assert_eq!(
            KeyValueStoreError::Write("disk full".into()).to_string(),
            "store write failed: disk full"
        );
    }
}
