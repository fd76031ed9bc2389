use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Platform family an identity source runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    Windows,
    MacOS,
    Linux,
    Android,
    IOS,
    /// Engine editor or any host without native identity APIs.
    Editor,
    Unknown,
}

impl Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Windows => write!(f, "windows"),
            Platform::MacOS => write!(f, "macos"),
            Platform::Linux => write!(f, "linux"),
            Platform::Android => write!(f, "android"),
            Platform::IOS => write!(f, "ios"),
            Platform::Editor => write!(f, "editor"),
            Platform::Unknown => write!(f, "unknown"),
        }
    }
}
