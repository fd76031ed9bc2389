//! 设备身份解析用例（编排器）

use std::sync::Arc;

use at_core::device::{AdvertisingIdOutcome, AdvertisingInfo, DeviceIdentity, UnavailableReason};
use at_core::operation::AsyncOperation;
use at_core::ports::{KeyValueStoreError, PlatformIdentitySource};
use tracing::{debug, info, info_span, warn, Instrument};

use super::{CheckFirstLaunch, ResolveDeviceId};
use crate::deps::DeviceInfoDeps;

/// Error type for identity resolution failures.
///
/// Missing advertising data is never an error; only the persisted store can
/// fail a resolution.
#[derive(Debug, thiserror::Error)]
pub enum ResolveDeviceIdentityError {
    #[error("persisted store failure: {0}")]
    Store(#[from] KeyValueStoreError),
}

/// Use case resolving the full `DeviceIdentity`.
///
/// ## Steps / 步骤
/// 1. Await the advertising identifier (the only suspension point)
/// 2. Query the vendor id and run the device id chain
/// 3. Check-and-set the first-launch flag
///
/// Either a complete identity is returned or an error; never a partial one.
/// Calls against the same store must not overlap, see [`crate::DeviceInfo`].
pub struct ResolveDeviceIdentity {
    identity_source: Arc<dyn PlatformIdentitySource>,
    resolve_device_id: ResolveDeviceId,
    check_first_launch: CheckFirstLaunch,
}

impl ResolveDeviceIdentity {
    pub fn new(deps: DeviceInfoDeps) -> Self {
        Self {
            identity_source: deps.identity_source,
            resolve_device_id: ResolveDeviceId::new(
                deps.store.clone(),
                deps.id_generator,
                deps.secure_storage,
            ),
            check_first_launch: CheckFirstLaunch::new(deps.store),
        }
    }

    /// Execute the use case.
    pub async fn execute(&self) -> Result<DeviceIdentity, ResolveDeviceIdentityError> {
        let span = info_span!(
            "usecase.resolve_device_identity.execute",
            platform = %self.identity_source.platform()
        );

        async {
            let advertising = self.query_advertising().await;

            let vendor_id = self.identity_source.vendor_id().filter(|v| !v.is_empty());
            let resolved = self
                .resolve_device_id
                .execute(vendor_id.as_deref(), &advertising)?;

            let first_launch = self.check_first_launch.execute()?;

            info!(
                source = %resolved.source,
                first_launch,
                tracking_enabled = advertising.tracking_enabled,
                "Device identity resolved"
            );

            Ok(DeviceIdentity::new(
                resolved.id,
                vendor_id.unwrap_or_default(),
                advertising,
                first_launch,
            ))
        }
        .instrument(span)
        .await
    }

    /// Run `execute` on the current Tokio runtime and return a pollable
    /// operation.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn start(self: Arc<Self>) -> AsyncOperation<DeviceIdentity, ResolveDeviceIdentityError> {
        let (operation, completer) = AsyncOperation::pending();

        tokio::spawn(async move {
            match self.execute().await {
                Ok(identity) => completer.try_set_result(identity),
                Err(err) => completer.try_set_error(err),
            };
        });

        operation
    }

    async fn query_advertising(&self) -> AdvertisingInfo {
        let outcome = self.identity_source.advertising_id().await;
        match &outcome {
            AdvertisingIdOutcome::Available(_) => {}
            AdvertisingIdOutcome::Unavailable(UnavailableReason::Failed(msg)) => {
                warn!(error = %msg, "Advertising id query failed; continuing without it");
            }
            AdvertisingIdOutcome::Unavailable(reason) => {
                debug!(%reason, "Advertising id unavailable");
            }
        }
        outcome.into_info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use at_core::device::{keys, Platform};
    use at_core::ports::{
        IdGeneratorPort, KeyValueStorePort, SecureStorageError, SecureStoragePort,
    };
    use at_core::OperationStatus;
    use at_infra::prefs::InMemoryPrefsStore;
    use mockall::mock;

    mock! {
        IdentitySource {}

        #[async_trait]
        impl PlatformIdentitySource for IdentitySource {
            fn platform(&self) -> Platform;
            async fn advertising_id(&self) -> AdvertisingIdOutcome;
            fn vendor_id(&self) -> Option<String>;
        }
    }

    mock! {
        IdGenerator {}

        impl IdGeneratorPort for IdGenerator {
            fn generate_id(&self) -> String;
        }
    }

    fn source(vendor: Option<&'static str>, outcome: AdvertisingIdOutcome) -> MockIdentitySource {
        let mut source = MockIdentitySource::new();
        source.expect_platform().return_const(Platform::Editor);
        source
            .expect_advertising_id()
            .returning(move || outcome.clone());
        source
            .expect_vendor_id()
            .returning(move || vendor.map(str::to_string));
        source
    }

    mock! {
        SecureStorage {}

        impl SecureStoragePort for SecureStorage {
            fn get(&self, key: &str) -> Result<Option<Vec<u8>>, SecureStorageError>;
            fn set(&self, key: &str, value: &[u8]) -> Result<(), SecureStorageError>;
        }
    }

    fn unused_generator() -> MockIdGenerator {
        let mut generator = MockIdGenerator::new();
        generator.expect_generate_id().never();
        generator
    }

    fn resolver(
        store: Arc<InMemoryPrefsStore>,
        source: MockIdentitySource,
        generator: MockIdGenerator,
    ) -> ResolveDeviceIdentity {
        ResolveDeviceIdentity::new(DeviceInfoDeps {
            store,
            identity_source: Arc::new(source),
            id_generator: Arc::new(generator),
            secure_storage: None,
        })
    }

    #[tokio::test]
    async fn vendor_id_example_resolves_and_persists() {
        let store = Arc::new(InMemoryPrefsStore::new());
        let use_case = resolver(
            store.clone(),
            source(
                Some("abc123"),
                AdvertisingIdOutcome::Unavailable(UnavailableReason::Unsupported),
            ),
            unused_generator(),
        );

        let first = use_case.execute().await.unwrap();
        assert_eq!(
            first,
            DeviceIdentity::new("abc123", "abc123", AdvertisingInfo::unavailable(), true)
        );
        assert_eq!(
            store.get_string(keys::DEVICE_ID).unwrap().as_deref(),
            Some("abc123")
        );
        assert!(store.has_key(keys::FIRST_LAUNCH).unwrap());

        let second = use_case.execute().await.unwrap();
        assert_eq!(second.device_id(), "abc123");
        assert_eq!(second.vendor_id(), "abc123");
        assert!(!second.first_launch());
    }

    #[tokio::test]
    async fn provider_failure_is_not_fatal() {
        let store = Arc::new(InMemoryPrefsStore::new());
        let use_case = resolver(
            store,
            source(
                Some("vendor"),
                AdvertisingIdOutcome::Unavailable(UnavailableReason::Failed(
                    "play services missing".to_string(),
                )),
            ),
            unused_generator(),
        );

        let identity = use_case.execute().await.unwrap();
        assert_eq!(identity.advertising_id(), "");
        assert!(!identity.advertising_tracking_enabled());
        assert_eq!(identity.device_id(), "vendor");
    }

    #[tokio::test]
    async fn exhausted_chain_generates_and_persists_token() {
        let store = Arc::new(InMemoryPrefsStore::new());
        let mut generator = MockIdGenerator::new();
        generator
            .expect_generate_id()
            .times(1)
            .returning(|| "f00dfeed".to_string());

        let use_case = resolver(
            store.clone(),
            source(
                None,
                AdvertisingIdOutcome::Unavailable(UnavailableReason::NotProvided),
            ),
            generator,
        );

        let first = use_case.execute().await.unwrap();
        let second = use_case.execute().await.unwrap();

        assert_eq!(first.device_id(), "f00dfeed");
        assert_eq!(first.vendor_id(), "");
        assert_eq!(second.device_id(), "f00dfeed");
        assert_eq!(
            store.get_string(keys::DEVICE_ID).unwrap().as_deref(),
            Some("f00dfeed")
        );
    }

    #[tokio::test]
    async fn advertising_data_is_reported_even_when_vendor_wins() {
        let store = Arc::new(InMemoryPrefsStore::new());
        let use_case = resolver(
            store,
            source(
                Some("vendor"),
                AdvertisingIdOutcome::Available(AdvertisingInfo::new("ad-id", true)),
            ),
            unused_generator(),
        );

        let identity = use_case.execute().await.unwrap();
        assert_eq!(identity.device_id(), "vendor");
        assert_eq!(identity.advertising_id(), "ad-id");
        assert!(identity.advertising_tracking_enabled());
    }

    #[tokio::test]
    async fn store_write_failure_fails_resolution() {
        let store = Arc::new(InMemoryPrefsStore::new());
        store.fail_writes(true);
        let use_case = resolver(
            store,
            source(
                Some("vendor"),
                AdvertisingIdOutcome::Unavailable(UnavailableReason::Unsupported),
            ),
            unused_generator(),
        );

        let err = use_case.execute().await.unwrap_err();
        assert!(matches!(
            err,
            ResolveDeviceIdentityError::Store(KeyValueStoreError::Write(_))
        ));
    }

    #[tokio::test]
    async fn start_returns_pollable_operation() {
        let store = Arc::new(InMemoryPrefsStore::new());
        let use_case = Arc::new(resolver(
            store,
            source(
                Some("abc123"),
                AdvertisingIdOutcome::Unavailable(UnavailableReason::Unsupported),
            ),
            unused_generator(),
        ));

        let operation = use_case.start();
        assert_eq!(operation.wait().await, OperationStatus::Succeeded);
        assert!(operation.is_completed_successfully());
        assert_eq!(operation.result().unwrap().device_id(), "abc123");
    }

    #[tokio::test]
    async fn start_reports_store_failure_as_fault() {
        let store = Arc::new(InMemoryPrefsStore::new());
        store.fail_writes(true);
        let use_case = Arc::new(resolver(
            store,
            source(
                None,
                AdvertisingIdOutcome::Unavailable(UnavailableReason::Unsupported),
            ),
            {
                let mut generator = MockIdGenerator::new();
                generator
                    .expect_generate_id()
                    .returning(|| "token".to_string());
                generator
            },
        ));

        let operation = use_case.start();
        assert_eq!(operation.wait().await, OperationStatus::Faulted);
        assert!(operation.result().is_err());
        assert!(matches!(
            operation.error().as_deref(),
            Some(ResolveDeviceIdentityError::Store(_))
        ));
    }

    #[tokio::test]
    async fn store_read_failure_fails_resolution() {
        let store = Arc::new(InMemoryPrefsStore::new());
        store.fail_reads(true);
        let use_case = resolver(
            store.clone(),
            source(
                Some("vendor"),
                AdvertisingIdOutcome::Unavailable(UnavailableReason::Unsupported),
            ),
            unused_generator(),
        );

        let err = use_case.execute().await.unwrap_err();
        assert!(matches!(
            err,
            ResolveDeviceIdentityError::Store(KeyValueStoreError::Read(_))
        ));
        assert_eq!(store.flush_count(), 0);
    }

    #[tokio::test]
    async fn reconciliation_write_failure_fails_resolution() {
        let store = Arc::new(InMemoryPrefsStore::new());
        store.fail_writes(true);

        let mut secure = MockSecureStorage::new();
        secure
            .expect_get()
            .returning(|_| Ok(Some(b"keychain-id".to_vec())));
        secure.expect_set().never();

        let use_case = ResolveDeviceIdentity::new(DeviceInfoDeps {
            store: store.clone(),
            identity_source: Arc::new(source(
                Some("vendor"),
                AdvertisingIdOutcome::Unavailable(UnavailableReason::Unsupported),
            )),
            id_generator: Arc::new(unused_generator()),
            secure_storage: Some(Arc::new(secure)),
        });

        let err = use_case.execute().await.unwrap_err();
        assert!(matches!(
            err,
            ResolveDeviceIdentityError::Store(KeyValueStoreError::Write(_))
        ));
        assert_eq!(store.get_string(keys::DEVICE_ID).unwrap(), None);
    }

    #[tokio::test]
    async fn zeroed_advertising_id_is_reported_empty() {
        let store = Arc::new(InMemoryPrefsStore::new());
        let use_case = resolver(
            store,
            source(
                Some("vendor"),
                AdvertisingIdOutcome::from_native(
                    "00000000-0000-0000-0000-000000000000",
                    false,
                    None,
                ),
            ),
            unused_generator(),
        );

        let identity = use_case.execute().await.unwrap();
        assert_eq!(identity.advertising_id(), "");
        assert!(!identity.advertising_tracking_enabled());
    }
}
