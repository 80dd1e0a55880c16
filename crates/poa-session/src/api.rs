//! The slice of the REST API the session store depends on.

use std::future::Future;

use poa_client::auth::{Credentials, Registration};
use poa_client::{ApiClient, ClientError};
use poa_core::entities::User;

/// Authentication calls plus access to the in-memory bearer token.
pub trait AuthApi: Send + Sync {
    fn token(&self) -> Option<String>;

    fn set_token(&self, token: Option<String>);

    fn login(
        &self,
        username: &str,
        password: &str,
    ) -> impl Future<Output = Result<Credentials, ClientError>> + Send;

    fn register(
        &self,
        registration: &Registration,
    ) -> impl Future<Output = Result<Credentials, ClientError>> + Send;

    fn current_user(&self) -> impl Future<Output = Result<User, ClientError>> + Send;
}

impl AuthApi for ApiClient {
    fn token(&self) -> Option<String> {
        Self::token(self)
    }

    fn set_token(&self, token: Option<String>) {
        Self::set_token(self, token);
    }

    fn login(
        &self,
        username: &str,
        password: &str,
    ) -> impl Future<Output = Result<Credentials, ClientError>> + Send {
        Self::login(self, username, password)
    }

    fn register(
        &self,
        registration: &Registration,
    ) -> impl Future<Output = Result<Credentials, ClientError>> + Send {
        Self::register(self, registration)
    }

    fn current_user(&self) -> impl Future<Output = Result<User, ClientError>> + Send {
        Self::current_user(self)
    }
}
