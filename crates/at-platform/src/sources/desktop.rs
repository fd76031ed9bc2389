use async_trait::async_trait;
use at_core::device::{AdvertisingIdOutcome, Platform, UnavailableReason};
use at_core::ports::PlatformIdentitySource;

use crate::capability::detect_platform;

type MachineIdReader = fn() -> Result<String, String>;

fn read_machine_uid() -> Result<String, String> {
    machine_uid::get().map_err(|e| e.to_string())
}

/// Identity source for desktop players and the editor.
///
/// The vendor id is the OS machine id (`/etc/machine-id`, `IOPlatformUUID`,
/// `MachineGuid`). Desktop platforms have no advertising identifier.
pub struct DesktopIdentitySource {
    platform: Platform,
    read_machine_id: MachineIdReader,
}

impl DesktopIdentitySource {
    pub fn new() -> Self {
        Self::with_platform(detect_platform())
    }

    /// Source for the engine editor.
    pub fn editor() -> Self {
        Self::with_platform(Platform::Editor)
    }

    pub fn with_platform(platform: Platform) -> Self {
        Self {
            platform,
            read_machine_id: read_machine_uid,
        }
    }

    #[cfg(test)]
    fn with_reader(platform: Platform, read_machine_id: MachineIdReader) -> Self {
        Self {
            platform,
            read_machine_id,
        }
    }
}

impl Default for DesktopIdentitySource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformIdentitySource for DesktopIdentitySource {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn advertising_id(&self) -> AdvertisingIdOutcome {
        AdvertisingIdOutcome::Unavailable(UnavailableReason::Unsupported)
    }

    fn vendor_id(&self) -> Option<String> {
        match (self.read_machine_id)() {
            Ok(id) => {
                let id = id.trim().to_string();
                (!id.is_empty()).then_some(id)
            }
            Err(err) => {
                log::warn!("Failed to read machine id: {err}");
                None
            }
        }
    }
}
