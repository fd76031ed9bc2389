use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use at_core::ports::{KeyValueStoreError, KeyValueStorePort};

/// Process-local preference store.
///
/// Used as the editor store and as a test double: `fail_writes` / `fail_reads`
/// inject store failures and `flush_count` counts successful flushes.
#[derive(Default)]
pub struct InMemoryPrefsStore {
    values: Mutex<HashMap<String, String>>,
    flushes: AtomicUsize,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl InMemoryPrefsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set_string` and `flush` fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `get_string` and `has_key` fail.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn flush_count(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }

    fn values(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_read(&self) -> Result<(), KeyValueStoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(KeyValueStoreError::Read("injected read failure".into()));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), KeyValueStoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(KeyValueStoreError::Write("injected write failure".into()));
        }
        Ok(())
    }
}

impl KeyValueStorePort for InMemoryPrefsStore {
    fn get_string(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        self.check_read()?;
        Ok(self.values().get(key).cloned())
    }

    fn set_string(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        self.check_write()?;
        self.values().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn has_key(&self, key: &str) -> Result<bool, KeyValueStoreError> {
        self.check_read()?;
        Ok(self.values().contains_key(key))
    }

    fn flush(&self) -> Result<(), KeyValueStoreError> {
        self.check_write()?;
        self.flushes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn injected_failures_are_typed() {
        let store = InMemoryPrefsStore::new();
        store.fail_reads(true);
        store.fail_writes(true);

        assert!(matches!(store.get_string("k"), Err(KeyValueStoreError::Read(_))));
        assert!(matches!(store.has_key("k"), Err(KeyValueStoreError::Read(_))));
        assert!(matches!(store.set_string("k", "v"), Err(KeyValueStoreError::Write(_))));
        assert!(matches!(store.flush(), Err(KeyValueStoreError::Write(_))));
        assert_eq!(store.flush_count(), 0);
    }

    #[test]
    fn flush_counts_only_successes() {
        let store = InMemoryPrefsStore::new();
        store.set_string("k", "v").unwrap();
        store.flush().unwrap();
        store.fail_writes(true);
        assert!(store.flush().is_err());
        assert_eq!(store.flush_count(), 1);
        assert_eq!(store.get_string("k").unwrap().as_deref(), Some("v"));
    }
}
