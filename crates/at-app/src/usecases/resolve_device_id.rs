//! Device id resolution chain.
//!
//! Precedence, first hit wins:
//!
//! 0. secure store (keychain mirror), when configured
//! 1. id persisted in the key-value store
//! 2. platform vendor id
//! 3. advertising id, only with tracking enabled
//! 4. freshly generated id
//!
//! A value chosen by steps 2-4 is written back and flushed so step 1 hits on
//! every later call. The secure store is the source of truth when it holds
//! a value: a diverging plain store is overwritten with it.

use std::sync::Arc;

use at_core::device::{keys, AdvertisingInfo, DeviceIdSource};
use at_core::ports::{
    IdGeneratorPort, KeyValueStoreError, KeyValueStorePort, SecureStoragePort,
};
use tracing::{debug, debug_span, info, warn};

/// A device id together with the chain step that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDeviceId {
    pub id: String,
    pub source: DeviceIdSource,
}

impl ResolvedDeviceId {
    fn new(id: String, source: DeviceIdSource) -> Self {
        Self { id, source }
    }
}

enum SecureLookup {
    Disabled,
    Found(String),
    Missing,
    Failed,
}

pub struct ResolveDeviceId {
    store: Arc<dyn KeyValueStorePort>,
    id_generator: Arc<dyn IdGeneratorPort>,
    secure_storage: Option<Arc<dyn SecureStoragePort>>,
}

impl ResolveDeviceId {
    pub fn new(
        store: Arc<dyn KeyValueStorePort>,
        id_generator: Arc<dyn IdGeneratorPort>,
        secure_storage: Option<Arc<dyn SecureStoragePort>>,
    ) -> Self {
        Self {
            store,
            id_generator,
            secure_storage,
        }
    }

    /// Resolve the device id.
    ///
    /// `vendor_id` and `advertising` are the platform answers gathered by the
    /// caller. Only key-value store failures are returned as errors; secure
    /// store failures are logged and skipped.
    pub fn execute(
        &self,
        vendor_id: Option<&str>,
        advertising: &AdvertisingInfo,
    ) -> Result<ResolvedDeviceId, KeyValueStoreError> {
        let span = debug_span!("usecase.resolve_device_id.execute");
        let _guard = span.enter();

        let persisted = self
            .store
            .get_string(keys::DEVICE_ID)?
            .filter(|id| !id.is_empty());

        let mirror = match self.lookup_secure() {
            SecureLookup::Found(secure_id) => {
                if persisted.as_deref() != Some(secure_id.as_str()) {
                    info!(
                        had_persisted = persisted.is_some(),
                        "Restoring device id from secure store"
                    );
                    self.persist(&secure_id)?;
                }
                return Ok(ResolvedDeviceId::new(secure_id, DeviceIdSource::SecureStore));
            }
            SecureLookup::Missing => true,
            SecureLookup::Disabled | SecureLookup::Failed => false,
        };

        if let Some(id) = persisted {
            debug!("Using persisted device id");
            if mirror {
                self.mirror_secure(&id);
            }
            return Ok(ResolvedDeviceId::new(id, DeviceIdSource::Persisted));
        }

        let (id, source) = self.choose_fresh(vendor_id, advertising);
        self.persist(&id)?;
        if mirror {
            self.mirror_secure(&id);
        }

        info!(source = %source, "Persisted new device id");
        Ok(ResolvedDeviceId::new(id, source))
    }

    fn choose_fresh(
        &self,
        vendor_id: Option<&str>,
        advertising: &AdvertisingInfo,
    ) -> (String, DeviceIdSource) {
        if let Some(vendor) = vendor_id.filter(|v| !v.is_empty()) {
            return (vendor.to_string(), DeviceIdSource::Vendor);
        }
        if let Some(ad_id) = advertising.usable_id() {
            return (ad_id.to_string(), DeviceIdSource::Advertising);
        }
        (self.id_generator.generate_id(), DeviceIdSource::Generated)
    }

    fn persist(&self, id: &str) -> Result<(), KeyValueStoreError> {
        self.store.set_string(keys::DEVICE_ID, id)?;
        self.store.flush()
    }

    fn lookup_secure(&self) -> SecureLookup {
        let Some(secure) = &self.secure_storage else {
            return SecureLookup::Disabled;
        };

        match secure.get(keys::DEVICE_ID) {
            Ok(Some(bytes)) => match String::from_utf8(bytes) {
                Ok(id) if !id.is_empty() => SecureLookup::Found(id),
                Ok(_) => SecureLookup::Missing,
                Err(err) => {
                    warn!(error = %err, "Secure store holds a non UTF-8 device id; ignoring it");
                    SecureLookup::Missing
                }
            },
            Ok(None) => SecureLookup::Missing,
            Err(err) => {
                warn!(error = %err, "Secure store read failed; continuing without it");
                SecureLookup::Failed
            }
        }
    }

    fn mirror_secure(&self, id: &str) {
        let Some(secure) = &self.secure_storage else {
            return;
        };
        if let Err(err) = secure.set(keys::DEVICE_ID, id.as_bytes()) {
            warn!(error = %err, "Failed to mirror device id into secure store");
        }
    }
}
