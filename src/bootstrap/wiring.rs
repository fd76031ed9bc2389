//! # Dependency Injection / 依赖注入
//!
//! Assembles the concrete adapters behind the `DeviceInfo` service.
//!
//! ## Responsibilities
//!
//! - ✅ Resolve default paths that the config DTO leaves empty
//! - ✅ Pick the secure storage backend for the current platform
//! - ✅ Inject every port into `DeviceInfoDeps`
//!
//! ## Prohibited
//!
//! ❌ **No identity logic** (lives in `at-app` use cases)

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use at_app::{DeviceInfo, DeviceInfoDeps, ResolveDeviceIdentity};
use at_core::config::AppConfig;
use at_core::ports::{PlatformIdentitySource, SecureStoragePort};
use at_core::Platform;
use at_infra::prefs::{FilePrefsStore, DEFAULT_PREFS_FILE};
use at_infra::UuidIdGenerator;
use at_platform::{create_secure_storage, detect_storage_capability, DesktopIdentitySource};

const APP_DIR_NAME: &str = "apptools";

/// Environment variable selecting an isolated data directory per profile.
pub const PROFILE_ENV: &str = "AT_PROFILE";

/// Per-user application data root, `<local data dir>/apptools[-<profile>]`.
pub fn resolve_app_data_root() -> anyhow::Result<PathBuf> {
    let base = dirs::data_local_dir().context("Failed to resolve local data directory")?;
    let profile = std::env::var(PROFILE_ENV).ok();
    Ok(base.join(app_dir_name(profile.as_deref())))
}

fn app_dir_name(profile: Option<&str>) -> String {
    match profile.map(str::trim) {
        Some(profile) if !profile.is_empty() => format!("{APP_DIR_NAME}-{profile}"),
        _ => APP_DIR_NAME.to_string(),
    }
}

/// Preferences file: the configured path, or `<app data root>/prefs.json`.
pub fn resolve_prefs_path(config: &AppConfig, app_data_root: &Path) -> PathBuf {
    if config.prefs_path.as_os_str().is_empty() {
        app_data_root.join(DEFAULT_PREFS_FILE)
    } else {
        config.prefs_path.clone()
    }
}

/// Wire a `DeviceInfo` for `identity_source` under the default data root.
pub fn build_device_info(
    config: &AppConfig,
    identity_source: Arc<dyn PlatformIdentitySource>,
) -> anyhow::Result<DeviceInfo> {
    let app_data_root = resolve_app_data_root()?;
    build_device_info_in(config, identity_source, &app_data_root)
}

/// Wire a `DeviceInfo` rooted at `app_data_root`.
pub fn build_device_info_in(
    config: &AppConfig,
    identity_source: Arc<dyn PlatformIdentitySource>,
    app_data_root: &Path,
) -> anyhow::Result<DeviceInfo> {
    let prefs_path = resolve_prefs_path(config, app_data_root);
    let store = FilePrefsStore::open(prefs_path.clone())
        .with_context(|| format!("Failed to open prefs store: {}", prefs_path.display()))?;

    let secure_storage = if wants_secure_mirror(config, identity_source.platform()) {
        build_secure_storage(config, app_data_root)
    } else {
        None
    };

    tracing::info!(
        platform = %identity_source.platform(),
        prefs = %prefs_path.display(),
        secure_mirror = secure_storage.is_some(),
        "Device info wired"
    );

    let deps = DeviceInfoDeps {
        store: Arc::new(store),
        identity_source,
        id_generator: Arc::new(UuidIdGenerator::new()),
        secure_storage,
    };

    Ok(DeviceInfo::new(ResolveDeviceIdentity::new(deps)))
}

/// `DeviceInfo` for a desktop host using the machine id as vendor id.
pub fn build_default_device_info(config: &AppConfig) -> anyhow::Result<DeviceInfo> {
    build_device_info(config, Arc::new(DesktopIdentitySource::new()))
}

/// iOS always mirrors: the keychain outlives an app reinstall.
fn wants_secure_mirror(config: &AppConfig, platform: Platform) -> bool {
    config.secure_mirror || platform == Platform::IOS
}

fn build_secure_storage(
    config: &AppConfig,
    app_data_root: &Path,
) -> Option<Arc<dyn SecureStoragePort>> {
    match create_secure_storage(
        detect_storage_capability(),
        &config.keychain_service,
        app_data_root,
    ) {
        Ok(storage) => Some(storage),
        Err(err) => {
            tracing::warn!(error = %err, "Secure storage unavailable, device id mirror disabled");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn app_dir_name_uses_profile_suffix() {
        assert_eq!(app_dir_name(None), "apptools");
        assert_eq!(app_dir_name(Some("  ")), "apptools");
        assert_eq!(app_dir_name(Some("qa")), "apptools-qa");
    }

    #[test]
    fn empty_prefs_path_defaults_to_app_data_root() {
        let root = PathBuf::from("/data/apptools");
        let config = AppConfig::default();
        assert_eq!(
            resolve_prefs_path(&config, &root),
            root.join("prefs.json")
        );

        let config = AppConfig {
            prefs_path: PathBuf::from("/custom/prefs.json"),
            ..AppConfig::default()
        };
        assert_eq!(
            resolve_prefs_path(&config, &root),
            PathBuf::from("/custom/prefs.json")
        );
    }

    #[test]
    fn ios_always_mirrors() {
        let config = AppConfig::default();
        assert!(wants_secure_mirror(&config, Platform::IOS));
        assert!(!wants_secure_mirror(&config, Platform::Android));

        let config = AppConfig {
            secure_mirror: true,
            ..AppConfig::default()
        };
        assert!(wants_secure_mirror(&config, Platform::Windows));
    }

    #[tokio::test]
    async fn wired_device_info_persists_id_under_root() {
        let dir = TempDir::new().unwrap();
        let source: Arc<dyn PlatformIdentitySource> =
            Arc::new(DesktopIdentitySource::editor());

        let first_id = {
            let info =
                build_device_info_in(&AppConfig::default(), source.clone(), dir.path()).unwrap();
            let identity = info.get().await.unwrap();
            assert!(identity.first_launch());
            identity.device_id().to_string()
        };
        assert!(dir.path().join("prefs.json").exists());

        let info = build_device_info_in(&AppConfig::default(), source, dir.path()).unwrap();
        let identity = info.get().await.unwrap();
        assert_eq!(identity.device_id(), first_id);
        assert!(!identity.first_launch());
    }

    #[test]
    fn corrupt_prefs_file_fails_wiring() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("prefs.json"), "not json").unwrap();

        let source: Arc<dyn PlatformIdentitySource> =
            Arc::new(DesktopIdentitySource::editor());
        let result = build_device_info_in(&AppConfig::default(), source, dir.path());
        assert!(result.is_err());
    }
}
