use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

use super::AdvertisingInfo;

/// Resolved identity of this installation.
///
/// Created once per resolution and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceIdentity {
    device_id: String,
    vendor_id: String,
    advertising_id: String,
    advertising_tracking_enabled: bool,
    first_launch: bool,
}

impl DeviceIdentity {
    pub fn new(
        device_id: impl Into<String>,
        vendor_id: impl Into<String>,
        advertising: AdvertisingInfo,
        first_launch: bool,
    ) -> Self {
        Self {
            device_id: device_id.into(),
            vendor_id: vendor_id.into(),
            advertising_id: advertising.id,
            advertising_tracking_enabled: advertising.tracking_enabled,
            first_launch,
        }
    }

    /// Stable device identifier.
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Platform vendor identifier, empty when the platform exposes none.
    pub fn vendor_id(&self) -> &str {
        &self.vendor_id
    }

    /// Advertising identifier, empty when unavailable.
    pub fn advertising_id(&self) -> &str {
        &self.advertising_id
    }

    pub fn advertising_tracking_enabled(&self) -> bool {
        self.advertising_tracking_enabled
    }

    /// True only on the very first resolution against a given store.
    pub fn first_launch(&self) -> bool {
        self.first_launch
    }
}

/// Step of the resolution chain that produced a device id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceIdSource {
    SecureStore,
    Persisted,
    Vendor,
    Advertising,
    Generated,
}

impl Display for DeviceIdSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeviceIdSource::SecureStore => "secure_store",
            DeviceIdSource::Persisted => "persisted",
            DeviceIdSource::Vendor => "vendor",
            DeviceIdSource::Advertising => "advertising",
            DeviceIdSource::Generated => "generated",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_fields() {
        let identity = DeviceIdentity::new(
            "abc123",
            "abc123",
            AdvertisingInfo::unavailable(),
            true,
        );
        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "deviceId": "abc123",
                "vendorId": "abc123",
                "advertisingId": "",
                "advertisingTrackingEnabled": false,
                "firstLaunch": true,
            })
        );
    }

    #[test]
    fn advertising_fields_come_from_info() {
        let identity = DeviceIdentity::new("d", "v", AdvertisingInfo::new("ad", true), false);
        assert_eq!(identity.advertising_id(), "ad");
        assert!(identity.advertising_tracking_enabled());
        assert!(!identity.first_launch());
    }

    #[test]
    fn source_display_matches_serde_name() {
        for source in [
            DeviceIdSource::SecureStore,
            DeviceIdSource::Persisted,
            DeviceIdSource::Vendor,
            DeviceIdSource::Advertising,
            DeviceIdSource::Generated,
        ] {
            let json = serde_json::to_value(source).unwrap();
            assert_eq!(json, serde_json::Value::String(source.to_string()));
        }
    }
}
