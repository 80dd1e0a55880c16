//! The session store: single source of truth for who is signed in.
//!
//! ```text
//! Uninitialized ──initialize()──▶ Initializing ──no token──────────────▶ Unauthenticated
//!                                      │ ├──token + cached user──────────▶ Authenticated (unverified)
//!                                      │ ├──token, fetch ok──────────────▶ Authenticated (verified)
//!                                      │ ├──token, fetch 401─────────────▶ Unauthenticated, token dropped
//!                                      │ └──token, fetch fails otherwise─▶ unchanged
//! Authenticated ──logout()/expire()──▶ Unauthenticated ──login()──▶ Authenticated (verified)
//! ```
//!
//! Methods never return errors: outcomes are reported as enums and storage
//! problems are logged.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use poa_client::auth::{Credentials, Registration};
use poa_client::ClientError;
use poa_config::SessionConfig;
use poa_core::entities::User;
use tokio::sync::{Mutex, broadcast, watch};
use tokio::task::JoinHandle;

use crate::api::AuthApi;
use crate::error::SessionError;
use crate::persisted::{PersistedSession, rehydrate};
use crate::state::{Session, Trust};
use crate::storage::{FileStorage, Storage};
use crate::token_store::{TOKEN_ENV_VAR, TokenSource, TokenStore};

/// Result of a login or registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    SignedIn(User),
    /// The attempt failed; the session is unchanged.
    Failed(String),
}

impl AuthOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::SignedIn(_))
    }
}

/// Result of an explicit server check of the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// The server confirmed the token; the user was refreshed.
    Verified(User),
    /// The server rejected the token; the session was cleared.
    Rejected,
    /// The server could not be asked; the session is unchanged.
    Unavailable(String),
    /// No token to verify.
    NoToken,
}

pub struct SessionStore<A> {
    api: A,
    tokens: TokenStore,
    storage: Arc<dyn Storage>,
    state: watch::Sender<Session>,
    init_lock: Mutex<()>,
    init_runs: AtomicU64,
    verify_timeout: Option<Duration>,
}

impl<A: AuthApi> SessionStore<A> {
    /// Build the store and rehydrate it from `storage`.
    ///
    /// The stored token (if any) is installed on `api`. A corrupt snapshot
    /// is logged and treated as absent.
    pub fn open(api: A, tokens: TokenStore, storage: Arc<dyn Storage>) -> Self {
        let token = tokens.load();
        if let Some((_, source)) = &token {
            tracing::debug!(%source, "restored bearer token");
        }
        let has_token = token.is_some();
        api.set_token(token.map(|(token, _)| token));

        let persisted = PersistedSession::load(storage.as_ref()).unwrap_or_else(|error| {
            tracing::warn!(%error, "ignoring unreadable session snapshot");
            None
        });
        let session = rehydrate(persisted, has_token);
        tracing::debug!(
            has_token,
            authenticated = session.is_authenticated(),
            "session rehydrated"
        );

        let (state, _) = watch::channel(session);
        Self {
            api,
            tokens,
            storage,
            state,
            init_lock: Mutex::new(()),
            init_runs: AtomicU64::new(0),
            verify_timeout: Some(Duration::from_secs(15)),
        }
    }

    /// File-backed store per the `[session]` config section.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoStorageDir` when no storage directory can be
    /// resolved.
    pub fn from_config(api: A, config: &SessionConfig) -> Result<Self, SessionError> {
        let dir = config.storage_path().ok_or(SessionError::NoStorageDir)?;
        let storage: Arc<dyn Storage> = Arc::new(FileStorage::new(dir));
        let tokens = TokenStore::new(Arc::clone(&storage))
            .with_keyring(config.use_keyring)
            .with_env_var(TOKEN_ENV_VAR);
        Ok(Self::open(api, tokens, storage).with_verify_timeout(config.verify_timeout()))
    }

    /// Bound for the current-user call. `None` waits indefinitely.
    #[must_use]
    pub fn with_verify_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.verify_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Change notifications; the receiver starts at the current state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Where the current token was loaded from, if any.
    #[must_use]
    pub fn token_source(&self) -> Option<TokenSource> {
        self.tokens.load().map(|(_, source)| source)
    }

    /// Reconcile the rehydrated session with the token and, if needed, the
    /// server. Concurrent callers share one run and see its result.
    pub async fn initialize(&self) -> Session {
        let seen = self.init_runs.load(Ordering::Acquire);
        let _guard = self.init_lock.lock().await;
        if self.init_runs.load(Ordering::Acquire) != seen {
            return self.snapshot();
        }

        self.update(Session::begin_initializing);
        self.run_initialize().await;
        self.update(Session::finish_initializing);

        self.init_runs.fetch_add(1, Ordering::AcqRel);
        self.snapshot()
    }

    async fn run_initialize(&self) {
        if self.api.token().is_none() {
            tracing::debug!("no token; session is signed out");
            self.update(Session::sign_out);
            return;
        }

        if self.snapshot().is_authenticated() {
            tracing::debug!("token and cached user; trusting restored session");
            return;
        }

        match self.fetch_current_user().await {
            Ok(user) => {
                tracing::info!(user = %user.username, "session restored from server");
                self.update(|session| session.sign_in(user, Trust::Verified));
            }
            Err(error) if error.is_unauthorized() => {
                tracing::info!("stored token rejected; signing out");
                self.reject_token();
            }
            Err(error) => {
                tracing::warn!(%error, "could not verify session; keeping current state");
            }
        }
    }

    /// Confirm the session with the server now.
    pub async fn verify(&self) -> Verification {
        if self.api.token().is_none() {
            return Verification::NoToken;
        }
        match self.fetch_current_user().await {
            Ok(user) => {
                self.update(|session| {
                    session.sign_in(user.clone(), Trust::Verified);
                    session.settle();
                });
                Verification::Verified(user)
            }
            Err(error) if error.is_unauthorized() => {
                self.reject_token();
                Verification::Rejected
            }
            Err(error) => {
                tracing::warn!(%error, "session verification unavailable");
                Verification::Unavailable(error.to_string())
            }
        }
    }

    /// # Returns
    ///
    /// [`AuthOutcome::Failed`] with the reason on any failure; the prior
    /// session is left as it was.
    pub async fn login(&self, username: &str, password: &str) -> AuthOutcome {
        match self.api.login(username, password).await {
            Ok(credentials) => self.accept(credentials),
            Err(error) => {
                tracing::warn!(%error, username, "login failed");
                AuthOutcome::Failed(error.to_string())
            }
        }
    }

    pub async fn register(&self, registration: &Registration) -> AuthOutcome {
        match self.api.register(registration).await {
            Ok(credentials) => self.accept(credentials),
            Err(error) => {
                tracing::warn!(%error, username = %registration.username, "registration failed");
                AuthOutcome::Failed(error.to_string())
            }
        }
    }

    pub fn logout(&self) {
        tracing::info!("signing out");
        self.drop_credentials();
    }

    /// Global sign-out after the server rejected the token mid-session.
    pub fn expire(&self) {
        if self.snapshot().is_authenticated() || self.api.token().is_some() {
            tracing::info!("session expired; signing out");
        }
        self.reject_token();
    }

    fn accept(&self, credentials: Credentials) -> AuthOutcome {
        let Credentials { token, user } = credentials;
        self.api.set_token(Some(token.clone()));
        if let Err(error) = self.tokens.store(&token) {
            tracing::warn!(%error, "failed to persist token; session lasts for this process only");
        }
        tracing::info!(user = %user.username, role = %user.role, "signed in");
        self.update(|session| {
            session.sign_in(user.clone(), Trust::Verified);
            session.settle();
        });
        AuthOutcome::SignedIn(user)
    }

    /// Drop a token the server refused. The env tier cannot be cleared from
    /// here, so a rejected env token comes back on the next start.
    fn reject_token(&self) {
        self.drop_credentials();
        if let Some((_, TokenSource::Env)) = self.tokens.load() {
            tracing::warn!(
                env = TOKEN_ENV_VAR,
                "server rejected the token from the environment; unset it or it will be sent again next run"
            );
        }
    }

    fn drop_credentials(&self) {
        self.api.set_token(None);
        if let Err(error) = self.tokens.delete() {
            tracing::warn!(%error, "failed to delete stored token");
        }
        self.update(|session| {
            session.sign_out();
            session.settle();
        });
    }

    async fn fetch_current_user(&self) -> Result<User, ClientError> {
        let request = self.api.current_user();
        match self.verify_timeout {
            Some(limit) => tokio::time::timeout(limit, request).await.unwrap_or_else(|_| {
                Err(ClientError::Rejected(format!(
                    "current-user check timed out after {}s",
                    limit.as_secs_f32()
                )))
            }),
            None => request.await,
        }
    }

    /// Apply `change`, notify subscribers, and persist the snapshot.
    fn update(&self, change: impl FnOnce(&mut Session)) {
        self.state.send_modify(change);
        let snapshot = PersistedSession::from(&*self.state.borrow());
        if let Err(error) = snapshot.save(self.storage.as_ref()) {
            tracing::warn!(%error, "failed to persist session");
        }
    }
}

impl<A: AuthApi + 'static> SessionStore<A> {
    /// Expire the session whenever `signals` fires. Ends when the sender
    /// is dropped.
    pub fn spawn_expiry_listener(
        self: &Arc<Self>,
        mut signals: broadcast::Receiver<()>,
    ) -> JoinHandle<()> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                match signals.recv().await {
                    Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => store.expire(),
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }
}

impl SessionStore<poa_client::ApiClient> {
    /// Wire the client's 401 notifications to [`Self::expire`].
    pub fn watch_unauthorized(self: &Arc<Self>) -> JoinHandle<()> {
        let signals = self.api.subscribe_unauthorized();
        self.spawn_expiry_listener(signals)
    }
}
