//! 首次启动检测用例

use std::sync::Arc;

use at_core::device::keys;
use at_core::ports::{KeyValueStoreError, KeyValueStorePort};

/// Sentinel value written under the first-launch key. Only presence matters.
const FIRST_LAUNCH_SENTINEL: &str = "0";

/// Check-and-set of the first-launch sentinel.
///
/// Not safe against concurrent processes sharing the same store.
pub struct CheckFirstLaunch {
    store: Arc<dyn KeyValueStorePort>,
}

impl CheckFirstLaunch {
    pub fn new(store: Arc<dyn KeyValueStorePort>) -> Self {
        Self { store }
    }

    /// # Returns / 返回值
    /// - `Ok(true)` if the sentinel was absent (it is now set and flushed)
    /// - `Ok(false)` if the sentinel was already present
    /// - `Err(e)` if the store cannot be read or written
    pub fn execute(&self) -> Result<bool, KeyValueStoreError> {
        if self.store.has_key(keys::FIRST_LAUNCH)? {
            return Ok(false);
        }

        self.store
            .set_string(keys::FIRST_LAUNCH, FIRST_LAUNCH_SENTINEL)?;
        self.store.flush()?;
        tracing::info!("First launch detected");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use at_infra::prefs::InMemoryPrefsStore;

    #[test]
    fn first_call_reports_first_launch_and_sets_sentinel() {
        let store = Arc::new(InMemoryPrefsStore::new());
        let use_case = CheckFirstLaunch::new(store.clone());

        assert!(use_case.execute().unwrap());
        assert!(store.has_key(keys::FIRST_LAUNCH).unwrap());
        assert_eq!(store.flush_count(), 1);
    }

    #[test]
    fn later_calls_do_not_write() {
        let store = Arc::new(InMemoryPrefsStore::new());
        let use_case = CheckFirstLaunch::new(store.clone());

        assert!(use_case.execute().unwrap());
        assert!(!use_case.execute().unwrap());
        assert!(!use_case.execute().unwrap());
        assert_eq!(store.flush_count(), 1);
    }

    #[test]
    fn any_value_under_the_key_counts_as_present() {
        let store = Arc::new(InMemoryPrefsStore::new());
        store.set_string(keys::FIRST_LAUNCH, "").unwrap();

        let use_case = CheckFirstLaunch::new(store);
        assert!(!use_case.execute().unwrap());
    }

    #[test]
    fn write_failure_is_propagated() {
        let store = Arc::new(InMemoryPrefsStore::new());
        store.fail_writes(true);

        let use_case = CheckFirstLaunch::new(store);
        let err = use_case.execute().unwrap_err();
        assert!(matches!(err, KeyValueStoreError::Write(_)));
    }
}
