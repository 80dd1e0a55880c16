//! # poa-client
//!
//! HTTP client for the POA quality-management REST API.
//!
//! [`ApiClient`] owns the bearer token and a single `reqwest::Client`. Every
//! request goes through one pipeline:
//!
//! - requests to protected paths without a token fail locally with
//!   [`ClientError::NotAuthenticated`] (no network call)
//! - a held token is always attached as `Authorization: Bearer <token>`
//! - a 401 outside the credential endpoints clears the token, notifies
//!   [`ApiClient::subscribe_unauthorized`] listeners, and fails with
//!   [`ClientError::Unauthorized`]
//! - other non-2xx statuses become [`ClientError::Api`] with the best message
//!   found in the body
//!
//! Per-entity operations live in one module per resource and are exposed as
//! inherent methods on [`ApiClient`]. [`views`] holds the pure joins used to
//! browse related records.

pub mod areas;
pub mod auth;
pub mod careers;
pub mod evidence;
pub mod faculties;
pub mod indicators;
pub mod lines;
pub mod objectives;
pub mod plans;
pub mod users;
pub mod views;

mod error;
mod http;

pub use error::ClientError;
pub use http::error_message;

use std::sync::{Arc, PoisonError, RwLock};

use poa_config::ApiConfig;
use poa_core::responses::ApiResponse;
use poa_core::{Record, normalize_all, normalize_id};
use reqwest::{Method, RequestBuilder, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::broadcast;

// ── Public endpoints ───────────────────────────────────────────────

/// Path prefixes reachable without a token.
pub const PUBLIC_ENDPOINTS: &[&str] = &[
    "/auth/login",
    "/auth/register",
    "/facultades",
    "/carreras",
    "/areas",
    "/lineas",
    "/objetivos",
    "/indicadores",
];

/// Whether `path` (relative to the API base, query allowed) needs no token.
#[must_use]
pub fn is_public_endpoint(path: &str) -> bool {
    let path = path.split('?').next().unwrap_or(path);
    PUBLIC_ENDPOINTS.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

fn is_credential_endpoint(path: &str) -> bool {
    let path = path.split('?').next().unwrap_or(path);
    path == "/auth/login" || path == "/auth/register"
}

// ── Client ─────────────────────────────────────────────────────────

/// Shared handle to the REST API. Cloning is cheap; clones share the token
/// and the unauthorized channel.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

struct Inner {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
    unauthorized: broadcast::Sender<()>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .field("has_token", &self.token().is_some())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Build a client from the `[api]` config section.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// fails to build (e.g. TLS backend initialization).
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::from_parts(http, config.base_url()))
    }

    /// Client with default settings against `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn with_base_url(base_url: &str) -> Result<Self, ClientError> {
        let config = ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        };
        Self::new(&config)
    }

    fn from_parts(http: reqwest::Client, base_url: &str) -> Self {
        let (unauthorized, _) = broadcast::channel(8);
        Self {
            inner: Arc::new(Inner {
                http,
                base_url: base_url.trim_end_matches('/').to_string(),
                token: RwLock::new(None),
                unauthorized,
            }),
        }
    }

    /// API base, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.inner
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the in-memory token. Empty strings clear it.
    pub fn set_token(&self, token: Option<String>) {
        let token = token.filter(|token| !token.is_empty());
        *self
            .inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = token;
    }

    pub fn clear_token(&self) {
        self.set_token(None);
    }

    /// Notified once per 401 response, after the token has been cleared.
    #[must_use]
    pub fn subscribe_unauthorized(&self) -> broadcast::Receiver<()> {
        self.inner.unauthorized.subscribe()
    }

    // ── Request pipeline ───────────────────────────────────────────

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Request builder with auth applied, or `NotAuthenticated` for a
    /// protected path without a token.
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let token = self.token();
        if token.is_none() && !is_public_endpoint(path) {
            tracing::debug!(%method, path, "refusing protected request without token");
            return Err(ClientError::NotAuthenticated);
        }
        let mut builder = self.inner.http.request(method, self.url(path));
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    /// Send and map the status. A 401 clears the token and broadcasts,
    /// except on the credential endpoints where it only means the submitted
    /// credentials were wrong.
    async fn execute(
        &self,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<reqwest::Response, ClientError> {
        let resp = builder.send().await?;
        tracing::debug!(status = resp.status().as_u16(), path, "api response");
        if resp.status() == reqwest::StatusCode::UNAUTHORIZED && !is_credential_endpoint(path) {
            tracing::warn!(url = %resp.url(), "token rejected; clearing session token");
            self.clear_token();
            let _ = self.inner.unauthorized.send(());
            return Err(ClientError::Unauthorized);
        }
        http::check_response(resp).await
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|error| ClientError::Parse(error.to_string()))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let builder = self
            .request(Method::GET, path)?
            .header(header::CONTENT_TYPE, "application/json");
        Self::decode(self.execute(path, builder).await?).await
    }

    pub(crate) async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(method, path)?.json(body);
        Self::decode(self.execute(path, builder).await?).await
    }

    pub(crate) async fn delete_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, ClientError> {
        let builder = self
            .request(Method::DELETE, path)?
            .header(header::CONTENT_TYPE, "application/json");
        Self::decode(self.execute(path, builder).await?).await
    }

    pub(crate) async fn send_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ClientError> {
        let builder = self.request(Method::POST, path)?.multipart(form);
        Self::decode(self.execute(path, builder).await?).await
    }

    // ── Record helpers ─────────────────────────────────────────────

    pub(crate) async fn list_records<R>(&self, path: &str, entity: &str) -> Result<Vec<R>, ClientError>
    where
        R: Record + DeserializeOwned,
    {
        let response: ApiResponse<Vec<R>> = self.get_json(path).await?;
        if !response.success {
            return Err(ClientError::Rejected(
                response.message_or(&format!("Failed to fetch {entity}")),
            ));
        }
        Ok(normalize_all(response.into_data().unwrap_or_default()))
    }

    /// `None` for a 404 or an empty successful payload.
    pub(crate) async fn fetch_record<R>(&self, path: &str, entity: &str) -> Result<Option<R>, ClientError>
    where
        R: Record + DeserializeOwned,
    {
        let response: ApiResponse<R> = match self.get_json(path).await {
            Ok(response) => response,
            Err(ClientError::Api { status: 404, .. }) => return Ok(None),
            Err(error) => return Err(error),
        };
        if !response.success {
            return Err(ClientError::Rejected(
                response.message_or(&format!("Failed to fetch {entity}")),
            ));
        }
        Ok(response.into_data().map(normalize_id))
    }

    pub(crate) async fn write_record<B, R>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: Record + DeserializeOwned,
    {
        let response: ApiResponse<R> = self.send_json(method, path, body).await?;
        if !response.success {
            return Err(ClientError::Rejected(response.message_or(fallback)));
        }
        response
            .into_data()
            .map(normalize_id)
            .ok_or_else(|| ClientError::Rejected(fallback.to_string()))
    }

    pub(crate) async fn create_record<B, R>(&self, path: &str, body: &B, entity: &str) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: Record + DeserializeOwned,
    {
        self.write_record(Method::POST, path, body, &format!("Failed to create {entity}"))
            .await
    }

    pub(crate) async fn update_record<B, R>(&self, path: &str, body: &B, entity: &str) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: Record + DeserializeOwned,
    {
        self.write_record(Method::PUT, path, body, &format!("Failed to update {entity}"))
            .await
    }

    pub(crate) async fn delete_record(&self, path: &str, entity: &str) -> Result<(), ClientError> {
        let response: ApiResponse<serde_json::Value> = self.delete_json(path).await?;
        if response.success {
            Ok(())
        } else {
            Err(ClientError::Rejected(
                response.message_or(&format!("Failed to delete {entity}")),
            ))
        }
    }
}

/// Percent-encode one path segment.
pub(crate) fn segment(id: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(id)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("/auth/login", true)]
    #[case("/auth/register", true)]
    #[case("/lineas", true)]
    #[case("/lineas/abc", true)]
    #[case("/indicadores?objetivoId=o1", true)]
    #[case("/carreras/c1", true)]
    #[case("/auth/me", false)]
    #[case("/poas", false)]
    #[case("/users", false)]
    #[case("/evidencias", false)]
    #[case("/areasx", false)]
    fn public_endpoint_allow_list(#[case] path: &str, #[case] public: bool) {
        assert_eq!(is_public_endpoint(path), public);
    }

    #[test]
    fn token_roundtrip_and_empty_clears() {
        let client = ApiClient::with_base_url("http://localhost:3000/api/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000/api");
        assert!(client.token().is_none());

        client.set_token(Some("abc".into()));
        assert_eq!(client.token().as_deref(), Some("abc"));

        client.set_token(Some(String::new()));
        assert!(client.token().is_none());
    }

    #[test]
    fn clones_share_token() {
        let client = ApiClient::with_base_url("http://localhost:3000/api").unwrap();
        let clone = client.clone();
        client.set_token(Some("shared".into()));
        assert_eq!(clone.token().as_deref(), Some("shared"));
        clone.clear_token();
        assert!(client.token().is_none());
    }

    #[tokio::test]
    async fn protected_request_without_token_fails_locally() {
        // Nothing listens on port 9; a network attempt would surface as Http.
        let client = ApiClient::with_base_url("http://127.0.0.1:9/api").unwrap();
        let err = client
            .get_json::<serde_json::Value>("/poas")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::NotAuthenticated));
    }
}
