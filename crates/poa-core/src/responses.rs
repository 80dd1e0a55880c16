//! Response envelopes returned by the REST API.
//!
//! Most endpoints answer `{ "success": bool, "data": ..., "count": n,
//! "message": "..." }`, but `data` is not consistent: some handlers put the
//! payload there directly, others wrap it again as `{ "data": payload }`.
//! [`Payload`] accepts both.

use serde::{Deserialize, Serialize};

use crate::entities::User;

/// Standard envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<Payload<T>>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
    /// Validation errors, as an array of `{msg, param, location}` or an
    /// object keyed by field.
    #[serde(default)]
    pub errors: Option<serde_json::Value>,
}

impl<T> ApiResponse<T> {
    /// The payload, only when the server reported success.
    pub fn into_data(self) -> Option<T> {
        if self.success {
            self.data.map(Payload::into_inner)
        } else {
            None
        }
    }

    /// Server message, or `fallback` when none was sent.
    #[must_use]
    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .as_deref()
            .filter(|message| !message.is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

/// `data` either holds the payload or wraps it once more.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Payload<T> {
    Nested { data: T },
    Direct(T),
}

impl<T> Payload<T> {
    pub fn into_inner(self) -> T {
        match self {
            Self::Nested { data } | Self::Direct(data) => data,
        }
    }
}

/// `POST /auth/login` and `POST /auth/register` put the token and user at the
/// envelope root instead of under `data`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
}

impl LoginResponse {
    /// Token and user of a well-formed success response.
    #[must_use]
    pub fn into_credentials(self) -> Option<(String, User)> {
        if !self.success {
            return None;
        }
        match (self.token, self.user) {
            (Some(token), Some(user)) if !token.is_empty() => Some((token, user)),
            _ => None,
        }
    }
}

/// `GET /auth/me` → `{ success, data: { user } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentUser {
    pub user: User,
}

/// One entry of an `errors` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(alias = "message")]
    pub msg: String,
    #[serde(default)]
    pub param: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::entities::Area;

    #[test]
    fn nested_list_payload_is_unwrapped() {
        let response: ApiResponse<Vec<Area>> = serde_json::from_value(json!({
            "success": true,
            "data": {"data": [{"_id": "a1", "nombre": "Finanzas"}], "count": 1}
        }))
        .unwrap();
        let areas = response.into_data().unwrap();
        assert_eq!(areas.len(), 1);
        assert_eq!(areas[0].name, "Finanzas");
    }

    #[test]
    fn direct_list_payload_is_accepted() {
        let response: ApiResponse<Vec<Area>> = serde_json::from_value(json!({
            "success": true,
            "data": [{"_id": "a1", "nombre": "Finanzas"}],
            "count": 1
        }))
        .unwrap();
        assert_eq!(response.count, Some(1));
        assert_eq!(response.into_data().unwrap().len(), 1);
    }

    #[test]
    fn unsuccessful_envelope_yields_no_data() {
        let response: ApiResponse<Vec<Area>> = serde_json::from_value(json!({
            "success": false,
            "data": [],
            "message": "Sin permisos"
        }))
        .unwrap();
        assert_eq!(response.message_or("fallback"), "Sin permisos");
        assert!(response.into_data().is_none());
    }

    #[test]
    fn message_or_uses_fallback_for_empty_message() {
        let response: ApiResponse<()> =
            serde_json::from_value(json!({"success": false, "message": ""})).unwrap();
        assert_eq!(response.message_or("Failed to delete area"), "Failed to delete area");
    }

    #[test]
    fn login_response_requires_token_and_user() {
        let ok: LoginResponse = serde_json::from_value(json!({
            "success": true,
            "token": "abc",
            "user": {"_id": "1", "username": "ana", "rol": "Usuario"}
        }))
        .unwrap();
        let (token, user) = ok.into_credentials().unwrap();
        assert_eq!(token, "abc");
        assert_eq!(user.username, "ana");

        let missing_user: LoginResponse =
            serde_json::from_value(json!({"success": true, "token": "abc"})).unwrap();
        assert!(missing_user.into_credentials().is_none());

        let empty_token: LoginResponse = serde_json::from_value(json!({
            "success": true,
            "token": "",
            "user": {"_id": "1", "username": "ana", "rol": "Usuario"}
        }))
        .unwrap();
        assert!(empty_token.into_credentials().is_none());
    }

    #[test]
    fn current_user_lives_under_data() {
        let response: ApiResponse<CurrentUser> = serde_json::from_value(json!({
            "success": true,
            "data": {"user": {"_id": "1", "username": "ana", "rol": "Usuario"}}
        }))
        .unwrap();
        assert_eq!(response.into_data().unwrap().user.username, "ana");
    }
}
