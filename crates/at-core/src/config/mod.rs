//! # Pure Data Module - Data Transfer Objects Only
//!
//! ## Responsibilities
//!
//! - ✅ Define configuration data structures
//! - ✅ Provide TOML → DTO mapping
//!
//! ## Prohibited
//!
//! ❌ **No validation logic**
//! ❌ **No default value calculation** (an empty `prefs_path` stays empty;
//! the bootstrap layer decides what it means)

use std::path::PathBuf;

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Preferences file path (may be empty - this is a fact, not an error)
    pub prefs_path: PathBuf,

    /// Mirror the device id into the platform secure store
    pub secure_mirror: bool,

    /// Keychain service name used by the secure store (may be empty)
    pub keychain_service: String,

    /// Directory for rolling log files (may be empty: stdout only)
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// **Prohibited**: This method must NOT contain any validation
    /// or default value logic. Missing keys become empty values.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        Ok(Self {
            prefs_path: PathBuf::from(
                toml_value
                    .get("storage")
                    .and_then(|s| s.get("prefs_path"))
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
            secure_mirror: toml_value
                .get("identity")
                .and_then(|i| i.get("secure_mirror"))
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
            keychain_service: toml_value
                .get("identity")
                .and_then(|i| i.get("keychain_service"))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            log_dir: PathBuf::from(
                toml_value
                    .get("logging")
                    .and_then(|l| l.get("log_dir"))
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_all_sections() {
        let value: toml::Value = toml::from_str(
            r#"
            [storage]
            prefs_path = "/data/prefs.json"

            [identity]
            secure_mirror = true
            keychain_service = "com.example.game"

            [logging]
            log_dir = "/data/logs"
            "#,
        )
        .unwrap();

        let config = AppConfig::from_toml(&value).unwrap();
        assert_eq!(config.prefs_path, PathBuf::from("/data/prefs.json"));
        assert!(config.secure_mirror);
        assert_eq!(config.keychain_service, "com.example.game");
        assert_eq!(config.log_dir, PathBuf::from("/data/logs"));
    }

    #[test]
    fn missing_sections_are_empty_facts() {
        let value: toml::Value = toml::from_str("").unwrap();
        let config = AppConfig::from_toml(&value).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn wrong_types_are_treated_as_missing() {
        let value: toml::Value = toml::from_str(
            r#"
            [identity]
            secure_mirror = "yes"
            "#,
        )
        .unwrap();
        let config = AppConfig::from_toml(&value).unwrap();
        assert!(!config.secure_mirror);
    }
}
