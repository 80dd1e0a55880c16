//! Bearer token persistence.
//!
//! Load priority: OS keychain → `POA_AUTH__TOKEN` env → [`Storage`] under
//! [`TOKEN_KEY`]. Writes go to the keychain when enabled and fall back to
//! storage when the keychain is unavailable.

use std::fmt;
use std::sync::Arc;

use crate::error::SessionError;
use crate::storage::{Storage, TOKEN_KEY};

const DEFAULT_KEYRING_SERVICE: &str = "poa-cli";
const KEYRING_USER: &str = "auth-token";

/// Env var consulted for a token (CI and scripted use).
pub const TOKEN_ENV_VAR: &str = "POA_AUTH__TOKEN";

/// Keyring service name. Override via `POA_KEYRING_SERVICE` to keep test
/// runs away from real credentials.
fn keyring_service() -> String {
    std::env::var("POA_KEYRING_SERVICE").unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string())
}

/// Where a loaded token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Keyring,
    Env,
    Storage,
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Keyring => "keyring",
            Self::Env => "env",
            Self::Storage => "file",
        })
    }
}

#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn Storage>,
    keyring: bool,
    env_var: Option<String>,
}

impl fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenStore")
            .field("keyring", &self.keyring)
            .field("env_var", &self.env_var)
            .finish_non_exhaustive()
    }
}

impl TokenStore {
    /// Storage-only token store: no keychain, no env lookup.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            keyring: false,
            env_var: None,
        }
    }

    #[must_use]
    pub fn with_keyring(mut self, enabled: bool) -> Self {
        self.keyring = enabled;
        self
    }

    #[must_use]
    pub fn with_env_var(mut self, name: impl Into<String>) -> Self {
        self.env_var = Some(name.into());
        self
    }

    fn entry() -> Result<keyring::Entry, keyring::Error> {
        keyring::Entry::new(&keyring_service(), KEYRING_USER)
    }

    /// The first non-empty token found, with its source.
    #[must_use]
    pub fn load(&self) -> Option<(String, TokenSource)> {
        if self.keyring {
            match Self::entry().and_then(|entry| entry.get_password()) {
                Ok(token) if !token.trim().is_empty() => {
                    return Some((token.trim().to_string(), TokenSource::Keyring));
                }
                Ok(_) | Err(keyring::Error::NoEntry) => {}
                Err(error) => tracing::debug!(%error, "keyring lookup failed"),
            }
        }

        if let Some(token) = self
            .env_var
            .as_deref()
            .and_then(|name| std::env::var(name).ok())
            .filter(|token| !token.trim().is_empty())
        {
            return Some((token.trim().to_string(), TokenSource::Env));
        }

        match self.storage.get(TOKEN_KEY) {
            Ok(token) => token
                .map(|token| token.trim().to_string())
                .filter(|token| !token.is_empty())
                .map(|token| (token, TokenSource::Storage)),
            Err(error) => {
                tracing::warn!(%error, "failed to read stored token");
                None
            }
        }
    }

    /// Persist `token`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` when the storage fallback fails as well.
    pub fn store(&self, token: &str) -> Result<(), SessionError> {
        if self.keyring {
            match Self::entry().and_then(|entry| entry.set_password(token)) {
                Ok(()) => {
                    if let Err(error) = self.storage.remove(TOKEN_KEY) {
                        tracing::warn!(%error, "failed to remove token file after keyring store");
                    }
                    return Ok(());
                }
                Err(error) => {
                    tracing::warn!(%error, "keyring store failed; falling back to file");
                }
            }
        }
        self.storage.set(TOKEN_KEY, token)
    }

    /// Remove the token from every writable tier. The env var is left alone.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the storage copy cannot be removed.
    pub fn delete(&self) -> Result<(), SessionError> {
        if self.keyring {
            if let Ok(entry) = Self::entry() {
                match entry.delete_credential() {
                    Ok(()) | Err(keyring::Error::NoEntry) => {}
                    Err(error) => tracing::warn!(%error, "keyring delete failed"),
                }
            }
        }
        self.storage.remove(TOKEN_KEY)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::storage::MemoryStorage;

    fn store() -> (Arc<MemoryStorage>, TokenStore) {
        let storage = Arc::new(MemoryStorage::new());
        let tokens = TokenStore::new(storage.clone());
        (storage, tokens)
    }

    #[test]
    fn storage_tier_roundtrip() {
        let (storage, tokens) = store();
        assert!(tokens.load().is_none());

        tokens.store("abc").unwrap();
        assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("abc"));
        assert_eq!(tokens.load(), Some(("abc".to_string(), TokenSource::Storage)));

        tokens.delete().unwrap();
        assert!(tokens.load().is_none());
    }

    #[test]
    fn blank_stored_token_is_ignored() {
        let (storage, tokens) = store();
        storage.set(TOKEN_KEY, "   ").unwrap();
        assert!(tokens.load().is_none());
    }

    #[test]
    fn source_labels() {
        assert_eq!(TokenSource::Keyring.to_string(), "keyring");
        assert_eq!(TokenSource::Storage.to_string(), "file");
    }
}
