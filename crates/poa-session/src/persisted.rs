//! The durable `{user, isAuthenticated}` snapshot and startup rehydration.
//!
//! Stored under [`SESSION_KEY`](crate::storage::SESSION_KEY) as
//! `{"state": {...}, "version": 0}`.

use poa_core::entities::User;
use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::state::Session;
use crate::storage::{SESSION_KEY, Storage};

const VERSION: u32 = 0;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(rename = "isAuthenticated", default)]
    pub is_authenticated: bool,
}

#[derive(Serialize, Deserialize)]
struct Envelope {
    state: PersistedSession,
    #[serde(default)]
    version: u32,
}

impl From<&Session> for PersistedSession {
    fn from(session: &Session) -> Self {
        Self {
            user: session.user().cloned(),
            is_authenticated: session.is_authenticated(),
        }
    }
}

impl PersistedSession {
    /// Read the snapshot. Missing → `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if storage fails or the payload is corrupt.
    pub fn load(storage: &dyn Storage) -> Result<Option<Self>, SessionError> {
        let Some(raw) = storage.get(SESSION_KEY)? else {
            return Ok(None);
        };
        let envelope: Envelope = serde_json::from_str(&raw)?;
        if envelope.version != VERSION {
            tracing::warn!(version = envelope.version, "unknown session snapshot version");
        }
        Ok(Some(envelope.state))
    }

    /// # Errors
    ///
    /// Returns `SessionError` if storage fails.
    pub fn save(&self, storage: &dyn Storage) -> Result<(), SessionError> {
        let raw = serde_json::to_string(&Envelope {
            state: self.clone(),
            version: VERSION,
        })?;
        storage.set(SESSION_KEY, &raw)
    }
}

/// Startup state from the stored snapshot and token presence.
///
/// A missing token always wins: no token means signed out, whatever the
/// snapshot says. With a token, a persisted user is trusted (unverified)
/// even if the snapshot's flag was false; without a user the session waits
/// for `initialize()` to fetch one.
#[must_use]
pub fn rehydrate(persisted: Option<PersistedSession>, has_token: bool) -> Session {
    match persisted.and_then(|snapshot| snapshot.user) {
        Some(user) if has_token => Session::restored(user),
        _ => Session::anonymous(),
    }
}
