use std::sync::Arc;

use anyhow::Context;
use poa_client::ApiClient;
use poa_config::PoaConfig;
use poa_session::SessionStore;

use crate::context::AppContext;

pub fn load_config() -> anyhow::Result<PoaConfig> {
    PoaConfig::load_with_dotenv().context("failed to load poa configuration")
}

/// Build the API client and the session store, and route the client's 401
/// notifications to the store.
pub fn build_context(config: PoaConfig) -> anyhow::Result<AppContext> {
    let client = ApiClient::new(&config.api).context("failed to build HTTP client")?;
    tracing::debug!(base_url = client.base_url(), "api client ready");

    let session = SessionStore::from_config(client, &config.session)
        .context("failed to open session storage")?;
    let session = Arc::new(session);
    let expiry = session.watch_unauthorized();

    Ok(AppContext::new(config, session, expiry))
}
