//! Authentication endpoints.
//!
//! Login and registration answer with the token and user at the envelope
//! root (`{success, token, user}`); `/auth/me` nests the user under `data`.

use poa_core::entities::User;
use poa_core::normalize_id;
use poa_core::responses::{ApiResponse, CurrentUser, LoginResponse};
use reqwest::Method;
use serde::Serialize;

use crate::{ApiClient, ClientError};

/// Self-registration payload. Optional fields are omitted when absent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Registration {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "apellido", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(rename = "carreraId", skip_serializing_if = "Option::is_none")]
    pub career: Option<String>,
    #[serde(rename = "areaId", skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
}

/// A token plus the user it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub user: User,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

impl ApiClient {
    /// `POST /auth/login`. On success the token is installed on this client.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] for a non-2xx answer (wrong password is usually
    /// a 400/401 with a message), [`ClientError::Rejected`] when the body
    /// lacks `success`, a token or a user.
    pub async fn login(&self, username: &str, password: &str) -> Result<Credentials, ClientError> {
        let response: LoginResponse = self
            .send_json(Method::POST, "/auth/login", &LoginRequest { username, password })
            .await?;
        self.install_credentials(response, "Login failed")
    }

    /// `POST /auth/register`. On success the token is installed.
    ///
    /// # Errors
    ///
    /// Same as [`Self::login`].
    pub async fn register(&self, registration: &Registration) -> Result<Credentials, ClientError> {
        if registration.username.trim().is_empty() || registration.password.trim().is_empty() {
            return Err(ClientError::Validation(
                "username and password are required".into(),
            ));
        }
        let response: LoginResponse = self
            .send_json(Method::POST, "/auth/register", registration)
            .await?;
        self.install_credentials(response, "Error al registrar el usuario")
    }

    /// `GET /auth/me`: the user the current token belongs to.
    ///
    /// # Errors
    ///
    /// [`ClientError::NotAuthenticated`] without a token,
    /// [`ClientError::Unauthorized`] if the server rejects it, and
    /// [`ClientError::Rejected`] for an envelope without a user.
    pub async fn current_user(&self) -> Result<User, ClientError> {
        let response: ApiResponse<CurrentUser> = self.get_json("/auth/me").await?;
        response
            .into_data()
            .map(|current| normalize_id(current.user))
            .ok_or_else(|| ClientError::Rejected("Failed to get current user".into()))
    }

    /// Drop the in-memory token. No request is sent.
    pub fn logout(&self) {
        self.clear_token();
    }

    fn install_credentials(
        &self,
        response: LoginResponse,
        fallback: &str,
    ) -> Result<Credentials, ClientError> {
        let message = response
            .message
            .clone()
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| fallback.to_string());
        let (token, user) = response
            .into_credentials()
            .ok_or(ClientError::Rejected(message))?;
        self.set_token(Some(token.clone()));
        Ok(Credentials {
            token,
            user: normalize_id(user),
        })
    }
}
