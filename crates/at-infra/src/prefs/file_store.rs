//! File-backed preference store.
//!
//! Preferences are a flat JSON object of string values. The file is read
//! once when the store is opened; writes stay in memory until `flush`.
//!
//! ## Notes
//!
//! - **Missing file is an empty store**: first launch has nothing on disk
//! - **Unreadable or corrupt file fails open**: silently starting empty
//!   would mint a new device id and break id stability
//! - **Atomic flush**: temp file + rename, direct write as fallback
//! - **Failed flush rolls back**: pending writes are discarded so reads never
//!   report a value that is not on disk

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use at_core::ports::{KeyValueStoreError, KeyValueStorePort};

pub const DEFAULT_PREFS_FILE: &str = "prefs.json";

struct PrefsState {
    values: BTreeMap<String, String>,
    /// Last snapshot known to be on disk.
    persisted: BTreeMap<String, String>,
}

pub struct FilePrefsStore {
    path: PathBuf,
    state: Mutex<PrefsState>,
}

impl FilePrefsStore {
    /// Open the store at `path`, loading existing preferences.
    pub fn open(path: PathBuf) -> Result<Self, KeyValueStoreError> {
        let values = load_from_disk(&path)?;
        tracing::debug!(path = %path.display(), keys = values.len(), "Opened prefs store");
        Ok(Self {
            path,
            state: Mutex::new(PrefsState {
                persisted: values.clone(),
                values,
            }),
        })
    }

    /// Open `<dir>/prefs.json`.
    pub fn open_in_dir(dir: &Path) -> Result<Self, KeyValueStoreError> {
        Self::open(dir.join(DEFAULT_PREFS_FILE))
    }

    fn state(&self) -> MutexGuard<'_, PrefsState> {
        // State is a plain map; a panic mid-update cannot leave it torn.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStorePort for FilePrefsStore {
    fn get_string(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        Ok(self.state().values.get(key).cloned())
    }

    fn set_string(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        self.state()
            .values
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn has_key(&self, key: &str) -> Result<bool, KeyValueStoreError> {
        Ok(self.state().values.contains_key(key))
    }

    fn flush(&self) -> Result<(), KeyValueStoreError> {
        let mut state = self.state();
        if state.values == state.persisted {
            return Ok(());
        }
        match save_to_disk(&self.path, &state.values) {
            Ok(()) => {
                state.persisted = state.values.clone();
                Ok(())
            }
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "Prefs flush failed; discarding unflushed writes"
                );
                state.values = state.persisted.clone();
                Err(err)
            }
        }
    }
}

fn load_from_disk(path: &Path) -> Result<BTreeMap<String, String>, KeyValueStoreError> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        KeyValueStoreError::Read(format!("read prefs file failed: {}: {e}", path.display()))
    })?;

    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    serde_json::from_str(&content).map_err(|e| {
        KeyValueStoreError::Corrupt(format!("invalid prefs file {}: {e}", path.display()))
    })
}

fn save_to_disk(path: &Path, values: &BTreeMap<String, String>) -> Result<(), KeyValueStoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            KeyValueStoreError::Write(format!(
                "create prefs dir failed: {}: {e}",
                parent.display()
            ))
        })?;
    }

    let json = serde_json::to_string_pretty(values)
        .map_err(|e| KeyValueStoreError::Write(format!("serialize prefs failed: {e}")))?;

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, &json).map_err(|e| {
        KeyValueStoreError::Write(format!(
            "write temp prefs failed: {}: {e}",
            tmp_path.display()
        ))
    })?;

    match fs::rename(&tmp_path, path) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            // Cross-device link or permission issue: non-atomic direct write.
            fs::write(path, &json).map_err(|e| {
                KeyValueStoreError::Write(format!(
                    "direct write prefs failed after rename error ({rename_err}): {}: {e}",
                    path.display()
                ))
            })?;
            let _ = fs::remove_file(&tmp_path);
            Ok(())
        }
    }
}
