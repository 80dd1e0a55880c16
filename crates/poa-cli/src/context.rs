use std::sync::Arc;

use poa_client::{ApiClient, ClientError};
use poa_config::PoaConfig;
use poa_session::SessionStore;
use tokio::task::JoinHandle;

use crate::cli::GlobalFlags;

pub const LOGIN_HINT: &str = "Run 'poa auth login <username>' to sign in.";

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: PoaConfig,
    pub session: Arc<SessionStore<ApiClient>>,
    expiry: JoinHandle<()>,
}

impl AppContext {
    pub const fn new(
        config: PoaConfig,
        session: Arc<SessionStore<ApiClient>>,
        expiry: JoinHandle<()>,
    ) -> Self {
        Self {
            config,
            session,
            expiry,
        }
    }

    pub fn client(&self) -> &ApiClient {
        self.session.api()
    }

    /// Row limit: `--limit`, else `general.default_limit`.
    pub fn limit(&self, flags: &GlobalFlags) -> usize {
        let limit = flags.limit.unwrap_or(self.config.general.default_limit);
        usize::try_from(limit).unwrap_or(usize::MAX)
    }

    /// Turn a client result into a command result. A rejected token expires
    /// the session right away and the error carries a login hint.
    pub fn checked<T>(&self, result: Result<T, ClientError>) -> anyhow::Result<T> {
        result.map_err(|error| {
            if error.is_unauthorized() {
                self.session.expire();
                anyhow::anyhow!("{error}: session expired. {LOGIN_HINT}")
            } else if matches!(error, ClientError::NotAuthenticated) {
                anyhow::anyhow!("{error} {LOGIN_HINT}")
            } else {
                anyhow::Error::from(error)
            }
        })
    }
}

impl Drop for AppContext {
    fn drop(&mut self) {
        self.expiry.abort();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use poa_client::{ApiClient, ClientError};
    use poa_config::PoaConfig;
    use poa_session::storage::TOKEN_KEY;
    use poa_session::{MemoryStorage, PersistedSession, SessionStore, Storage, TokenStore};
    use serde_json::json;

    use super::{AppContext, LOGIN_HINT};
    use crate::commands::shared::session::{require_admin, require_user};

    /// Context restored from storage holding `role`'s user and a token.
    fn restored_context(role: Option<&str>) -> AppContext {
        let storage = Arc::new(MemoryStorage::new());
        if let Some(role) = role {
            storage.set(TOKEN_KEY, "stored-token").unwrap();
            PersistedSession {
                user: Some(
                    serde_json::from_value(json!({"_id": "u1", "username": "ana", "rol": role}))
                        .unwrap(),
                ),
                is_authenticated: true,
            }
            .save(&*storage)
            .unwrap();
        }
        let client = ApiClient::with_base_url("http://127.0.0.1:9/api").unwrap();
        let session = Arc::new(SessionStore::open(
            client,
            TokenStore::new(storage.clone()),
            storage,
        ));
        let expiry = session.watch_unauthorized();
        AppContext::new(PoaConfig::default(), session, expiry)
    }

    #[tokio::test]
    async fn missing_token_error_carries_login_hint() {
        let ctx = restored_context(None);
        let err = ctx.checked::<()>(Err(ClientError::NotAuthenticated)).unwrap_err();
        assert!(err.to_string().contains(LOGIN_HINT));
    }

    #[tokio::test]
    async fn rejected_token_expires_session() {
        let ctx = restored_context(Some("Usuario"));
        assert!(ctx.session.initialize().await.is_authenticated());

        let err = ctx.checked::<()>(Err(ClientError::Unauthorized)).unwrap_err();
        assert!(err.to_string().contains("session expired"));
        assert!(!ctx.session.snapshot().is_authenticated());
        assert!(ctx.client().token().is_none());
    }

    #[tokio::test]
    async fn other_errors_pass_through() {
        let ctx = restored_context(None);
        let err = ctx
            .checked::<()>(Err(ClientError::Rejected("Failed to delete area".into())))
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to delete area");
    }

    #[tokio::test]
    async fn guards_follow_restored_role() {
        let ctx = restored_context(Some("Usuario"));
        assert_eq!(require_user(&ctx).await.unwrap().username, "ana");
        let err = require_admin(&ctx).await.unwrap_err();
        assert!(err.to_string().contains("requires role Administrador"));

        let ctx = restored_context(Some("Administrador"));
        assert!(require_admin(&ctx).await.is_ok());
    }

    #[tokio::test]
    async fn signed_out_user_gets_login_hint() {
        let ctx = restored_context(None);
        let err = require_user(&ctx).await.unwrap_err();
        assert!(err.to_string().contains(LOGIN_HINT));
    }

    #[test]
    fn limit_defaults_to_config() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let _guard = runtime.enter();
        let ctx = restored_context(None);
        let mut flags = crate::cli::GlobalFlags {
            format: crate::cli::OutputFormat::Json,
            limit: None,
            quiet: false,
        };
        assert_eq!(ctx.limit(&flags), 50);
        flags.limit = Some(3);
        assert_eq!(ctx.limit(&flags), 3);
    }
}
