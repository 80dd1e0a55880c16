//! Session persistence configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

const fn default_use_keyring() -> bool {
    true
}

const fn default_verify_timeout_secs() -> u64 {
    15
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Directory for the persisted session and the token file fallback.
    /// Empty means `<config dir>/poa`.
    #[serde(default)]
    pub storage_dir: String,

    /// Keep the bearer token in the OS keychain when available.
    #[serde(default = "default_use_keyring")]
    pub use_keyring: bool,

    /// Upper bound for the current-user check during startup, in seconds.
    /// `0` disables the bound.
    #[serde(default = "default_verify_timeout_secs")]
    pub verify_timeout_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_dir: String::new(),
            use_keyring: default_use_keyring(),
            verify_timeout_secs: default_verify_timeout_secs(),
        }
    }
}

impl SessionConfig {
    /// Resolved storage directory. `None` when no config dir can be found.
    #[must_use]
    pub fn storage_path(&self) -> Option<PathBuf> {
        if self.storage_dir.trim().is_empty() {
            dirs::config_dir().map(|dir| dir.join("poa"))
        } else {
            Some(PathBuf::from(self.storage_dir.trim()))
        }
    }

    #[must_use]
    pub const fn verify_timeout(&self) -> Option<Duration> {
        if self.verify_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.verify_timeout_secs))
        }
    }
}
