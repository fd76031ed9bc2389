pub mod id_gen;
pub mod prefs;

pub use id_gen::UuidIdGenerator;
pub use prefs::{FilePrefsStore, InMemoryPrefsStore};
