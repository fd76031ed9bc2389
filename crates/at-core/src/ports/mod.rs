//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases in `at-app` and the
//! adapters in `at-infra` / `at-platform`. Use cases only ever see
//! `Arc<dyn Port>`, so every port is `Send + Sync`.

pub mod id_generator;
pub mod identity_source;
pub mod kv_store;
pub mod secure_storage;

pub use id_generator::IdGeneratorPort;
pub use identity_source::PlatformIdentitySource;
pub use kv_store::{KeyValueStoreError, KeyValueStorePort};
pub use secure_storage::{SecureStorageError, SecureStoragePort};
