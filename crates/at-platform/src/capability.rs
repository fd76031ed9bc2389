//! Platform and capability detection.
//!
//! Detects the platform family of the build target and whether it offers a
//! system keychain for mirroring the device id.

use at_core::Platform;

/// Represents the secure storage capability of the current platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecureStorageCapability {
    /// Platform has a working system keychain (Apple Keychain, Windows Credential Manager, Linux Secret Service)
    SystemKeyring,
    /// Platform requires file-based storage (WSL, headless Linux)
    FileBasedKeystore,
    /// Platform is not supported for secure storage
    Unsupported,
}

/// Platform family of the build target.
pub fn detect_platform() -> Platform {
    if cfg!(target_os = "ios") {
        Platform::IOS
    } else if cfg!(target_os = "android") {
        Platform::Android
    } else if cfg!(target_os = "macos") {
        Platform::MacOS
    } else if cfg!(target_os = "windows") {
        Platform::Windows
    } else if cfg!(target_os = "linux") {
        Platform::Linux
    } else {
        Platform::Unknown
    }
}

/// Detect the secure storage capability of the current platform.
///
/// # Detection Logic
///
/// - **iOS / macOS / Windows**: `SystemKeyring`
/// - **Linux**:
///   - WSL → `FileBasedKeystore`
///   - desktop session (DISPLAY + DBUS) → `SystemKeyring`
///   - otherwise → `FileBasedKeystore`
/// - **Android / other**: `Unsupported`
pub fn detect_storage_capability() -> SecureStorageCapability {
    let capability = capability_for(detect_platform(), is_wsl(), has_desktop_environment());
    log::debug!("Detected secure storage capability: {:?}", capability);
    capability
}

fn capability_for(platform: Platform, wsl: bool, desktop: bool) -> SecureStorageCapability {
    match platform {
        Platform::IOS | Platform::MacOS | Platform::Windows => SecureStorageCapability::SystemKeyring,
        Platform::Linux if wsl => {
            log::warn!("WSL environment detected. Using file-based secure storage");
            SecureStorageCapability::FileBasedKeystore
        }
        Platform::Linux if desktop => SecureStorageCapability::SystemKeyring,
        Platform::Linux => {
            log::warn!("No desktop environment detected. Using file-based secure storage");
            SecureStorageCapability::FileBasedKeystore
        }
        Platform::Android | Platform::Editor | Platform::Unknown => {
            SecureStorageCapability::Unsupported
        }
    }
}

/// Detect if running under WSL (Windows Subsystem for Linux).
fn is_wsl() -> bool {
    if !cfg!(target_os = "linux") {
        return false;
    }
    if let Ok(version) = std::fs::read_to_string("/proc/version") {
        if version.contains("Microsoft") || version.contains("WSL") {
            return true;
        }
    }
    std::env::var("WSL_DISTRO_NAME").is_ok() || std::env::var("WSL_INTEROP").is_ok()
}

/// Keyring daemons (gnome-keyring, kwallet) need both a display and a
/// session bus.
fn has_desktop_environment() -> bool {
    std::env::var("DISPLAY").is_ok() && std::env::var("DBUS_SESSION_BUS_ADDRESS").is_ok()
}
