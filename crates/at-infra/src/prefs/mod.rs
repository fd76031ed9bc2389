//! Key-value preference stores.
//!
//! - `FilePrefsStore`: JSON file in the app data directory, for players
//! - `InMemoryPrefsStore`: process-local, for the editor and tests

mod file_store;
mod memory;

pub use file_store::{FilePrefsStore, DEFAULT_PREFS_FILE};
pub use memory::InMemoryPrefsStore;
