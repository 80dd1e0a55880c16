//! Client error types.

use thiserror::Error;

/// Errors that can occur when talking to the REST API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error (connection refused, timeout, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A protected endpoint was called without a bearer token. No request
    /// was sent.
    #[error("No autenticado. Por favor, inicia sesión.")]
    NotAuthenticated,

    /// The server rejected the bearer token (HTTP 401).
    #[error("Unauthorized")]
    Unauthorized,

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// The API answered 2xx with `success: false` or without a payload.
    #[error("{0}")]
    Rejected(String),

    /// The response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// Input failed a local check; no request was sent.
    #[error("validation error: {0}")]
    Validation(String),

    /// Reading a local file for upload failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// The token is invalid; the session must be dropped.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::Api { status: 401, .. })
    }

    /// Failures that say nothing about the validity of the session.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(error) => error.is_timeout() || error.is_connect() || error.is_request(),
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// HTTP status carried by the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Api { status, .. } => Some(*status),
            Self::Http(error) => error.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_classification() {
        assert!(ClientError::Unauthorized.is_unauthorized());
        assert!(
            ClientError::Api {
                status: 401,
                message: "jwt expired".into()
            }
            .is_unauthorized()
        );
        assert!(!ClientError::NotAuthenticated.is_unauthorized());
    }

    #[test]
    fn server_errors_are_transient() {
        let error = ClientError::Api {
            status: 503,
            message: "maintenance".into(),
        };
        assert!(error.is_transient());
        assert!(!error.is_unauthorized());
        assert_eq!(error.status(), Some(503));
    }

    #[test]
    fn client_errors_are_not_transient() {
        let error = ClientError::Api {
            status: 422,
            message: "invalid".into(),
        };
        assert!(!error.is_transient());
        assert!(!ClientError::Rejected("nope".into()).is_transient());
    }

    #[test]
    fn not_authenticated_message_matches_ui_text() {
        assert_eq!(
            ClientError::NotAuthenticated.to_string(),
            "No autenticado. Por favor, inicia sesión."
        );
    }
}
