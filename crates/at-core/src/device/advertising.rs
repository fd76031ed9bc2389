use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Advertising identifier as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvertisingInfo {
    pub id: String,
    pub tracking_enabled: bool,
}

impl AdvertisingInfo {
    pub fn new(id: impl Into<String>, tracking_enabled: bool) -> Self {
        Self {
            id: id.into(),
            tracking_enabled,
        }
    }

    /// Empty id, tracking disabled.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// The id if it may be used to identify the device.
    ///
    /// Requires tracking to be enabled and a non-empty id. iOS reports an
    /// all-zero UUID when the user limited ad tracking; that value is never
    /// usable.
    pub fn usable_id(&self) -> Option<&str> {
        if !self.tracking_enabled || is_blank_id(&self.id) {
            return None;
        }
        Some(self.id.as_str())
    }
}

/// Empty, or the all-zero UUID iOS hands out under limited ad tracking.
fn is_blank_id(id: &str) -> bool {
    let id = id.trim();
    id.is_empty() || id.chars().all(|c| c == '0' || c == '-')
}

/// Why an advertising identifier could not be obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnavailableReason {
    /// The platform has no advertising identifier API.
    Unsupported,
    /// The platform API answered without an id.
    NotProvided,
    /// The platform API reported an error message.
    Failed(String),
    /// The completion callback was dropped without firing.
    Dropped,
}

impl Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableReason::Unsupported => write!(f, "unsupported"),
            UnavailableReason::NotProvided => write!(f, "not provided"),
            UnavailableReason::Failed(msg) => write!(f, "failed: {msg}"),
            UnavailableReason::Dropped => write!(f, "callback dropped"),
        }
    }
}

/// Result of an advertising identifier query. Never an error: absence of
/// advertising data does not fail identity resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvertisingIdOutcome {
    Available(AdvertisingInfo),
    Unavailable(UnavailableReason),
}

impl AdvertisingIdOutcome {
    /// Map a raw native answer (id string, tracking flag, error message).
    ///
    /// A non-empty error message wins over any id that came with it. An empty
    /// or all-zero id counts as not provided.
    pub fn from_native(id: &str, tracking_enabled: bool, error: Option<&str>) -> Self {
        if let Some(msg) = error.filter(|m| !m.is_empty()) {
            return AdvertisingIdOutcome::Unavailable(UnavailableReason::Failed(msg.to_string()));
        }
        if is_blank_id(id) {
            return AdvertisingIdOutcome::Unavailable(UnavailableReason::NotProvided);
        }
        AdvertisingIdOutcome::Available(AdvertisingInfo::new(id, tracking_enabled))
    }

    /// Collapse into the data stored on the identity.
    pub fn into_info(self) -> AdvertisingInfo {
        match self {
            AdvertisingIdOutcome::Available(info) => info,
            AdvertisingIdOutcome::Unavailable(_) => AdvertisingInfo::unavailable(),
        }
    }
}
