//! User administration (`/users`).
//!
//! Request bodies are assembled by hand rather than serialized from
//! [`User`]: the API wants trimmed optional fields, omits unset ones, and
//! only accepts a career or area for plain users.

use poa_core::entities::User;
use poa_core::enums::UserRole;
use serde_json::{Map, Value, json};

use crate::{ApiClient, ClientError, segment};

const ENTITY: &str = "user";

/// Input for creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: UserRole,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub career: Option<String>,
    pub area: Option<String>,
}

/// Partial update. `None` fields are left untouched on the server.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<UserRole>,
    pub active: Option<bool>,
    /// Sent only when non-blank.
    pub password: Option<String>,
    pub career: Option<String>,
    pub area: Option<String>,
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

impl NewUser {
    /// JSON body for `POST /users`.
    ///
    /// # Errors
    ///
    /// [`ClientError::Validation`] for a blank password or username.
    pub fn to_body(&self) -> Result<Value, ClientError> {
        if self.password.trim().is_empty() {
            return Err(ClientError::Validation(
                "La contraseña es requerida para crear un usuario".into(),
            ));
        }
        if self.username.trim().is_empty() {
            return Err(ClientError::Validation(
                "El nombre de usuario es requerido".into(),
            ));
        }

        let mut body = Map::new();
        body.insert("username".into(), json!(self.username.trim()));
        body.insert("password".into(), json!(self.password));
        body.insert("rol".into(), json!(self.role));

        for (key, value) in [
            ("email", &self.email),
            ("nombre", &self.first_name),
            ("apellido", &self.last_name),
        ] {
            if let Some(value) = trimmed(value.as_deref()) {
                body.insert(key.into(), json!(value));
            }
        }

        if self.role == UserRole::User {
            if let Some(career) = trimmed(self.career.as_deref()) {
                body.insert("carreraId".into(), json!(career));
            } else if let Some(area) = trimmed(self.area.as_deref()) {
                body.insert("areaId".into(), json!(area));
            }
        } else {
            body.insert("carreraId".into(), Value::Null);
            body.insert("areaId".into(), Value::Null);
        }

        Ok(Value::Object(body))
    }
}

impl UserUpdate {
    /// JSON body for `PUT /users/:id`.
    ///
    /// Unit rules: an administrator role clears both units; a user role
    /// sends the given units (blank → `null`); without a role change the
    /// given units are sent as-is.
    #[must_use]
    pub fn to_body(&self) -> Value {
        let mut body = Map::new();
        let mut put = |key: &str, value: Option<Value>| {
            if let Some(value) = value {
                body.insert(key.to_string(), value);
            }
        };

        put("username", self.username.as_ref().map(|v| json!(v)));
        put("email", self.email.as_ref().map(|v| json!(v)));
        put("nombre", self.first_name.as_ref().map(|v| json!(v)));
        put("apellido", self.last_name.as_ref().map(|v| json!(v)));
        put("rol", self.role.map(|role| json!(role)));
        put("activo", self.active.map(Value::Bool));
        put(
            "password",
            trimmed(self.password.as_deref()).and(self.password.as_ref().map(|v| json!(v))),
        );

        let unit = |value: &Option<String>| {
            value
                .as_deref()
                .map(|id| trimmed(Some(id)).map_or(Value::Null, |id| json!(id)))
        };
        match self.role {
            Some(UserRole::Admin) => {
                put("carreraId", Some(Value::Null));
                put("areaId", Some(Value::Null));
            }
            Some(UserRole::User) | None => {
                put("carreraId", unit(&self.career));
                put("areaId", unit(&self.area));
            }
        }

        Value::Object(body)
    }
}

impl ApiClient {
    /// # Errors
    ///
    /// Transport, status, or `success: false` failures.
    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        self.list_records("/users", ENTITY).await
    }

    /// # Errors
    ///
    /// Transport, status (other than 404), or `success: false` failures.
    pub async fn get_user(&self, id: &str) -> Result<Option<User>, ClientError> {
        self.fetch_record(&format!("/users/{}", segment(id)), ENTITY).await
    }

    /// Validate locally, then `POST /users`.
    ///
    /// # Errors
    ///
    /// [`ClientError::Validation`] before any request for a blank password
    /// or username, otherwise transport, status or rejection failures.
    pub async fn create_user(&self, user: &NewUser) -> Result<User, ClientError> {
        let body = user.to_body()?;
        self.create_record("/users", &body, ENTITY).await
    }

    /// # Errors
    ///
    /// Transport, status, or `success: false` failures.
    pub async fn update_user(&self, id: &str, changes: &UserUpdate) -> Result<User, ClientError> {
        self.update_record(&format!("/users/{}", segment(id)), &changes.to_body(), ENTITY)
            .await
    }

    /// # Errors
    ///
    /// Transport, status, or `success: false` failures.
    pub async fn delete_user(&self, id: &str) -> Result<(), ClientError> {
        self.delete_record(&format!("/users/{}", segment(id)), ENTITY).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn new_user(role: UserRole) -> NewUser {
        NewUser {
            username: "  ana  ".into(),
            password: "s3cret".into(),
            role,
            email: Some(" ana@uni.edu ".into()),
            first_name: Some("   ".into()),
            last_name: None,
            career: Some(" c1 ".into()),
            area: Some("a1".into()),
        }
    }

    #[test]
    fn plain_user_gets_career_over_area() {
        let body = new_user(UserRole::User).to_body().unwrap();
        assert_eq!(
            body,
            json!({
                "username": "ana",
                "password": "s3cret",
                "rol": "Usuario",
                "email": "ana@uni.edu",
                "carreraId": "c1"
            })
        );
    }

    #[test]
    fn plain_user_without_career_gets_area() {
        let mut user = new_user(UserRole::User);
        user.career = Some(String::new());
        let body = user.to_body().unwrap();
        assert_eq!(body["areaId"], "a1");
        assert!(body.get("carreraId").is_none());
    }

    #[test]
    fn admin_units_are_explicit_nulls() {
        let body = new_user(UserRole::Admin).to_body().unwrap();
        assert_eq!(body["carreraId"], Value::Null);
        assert_eq!(body["areaId"], Value::Null);
        assert_eq!(body["rol"], "Administrador");
    }

    #[test]
    fn blank_password_is_rejected_locally() {
        let mut user = new_user(UserRole::User);
        user.password = "   ".into();
        let err = user.to_body().unwrap_err();
        assert!(matches!(err, ClientError::Validation(ref m) if m.contains("contraseña")));
    }

    #[test]
    fn blank_username_is_rejected_locally() {
        let mut user = new_user(UserRole::User);
        user.username = String::new();
        assert!(matches!(user.to_body(), Err(ClientError::Validation(_))));
    }

    #[test]
    fn update_sends_only_given_fields() {
        let update = UserUpdate {
            email: Some("new@uni.edu".into()),
            password: Some("  ".into()),
            ..UserUpdate::default()
        };
        assert_eq!(update.to_body(), json!({"email": "new@uni.edu"}));
    }

    #[test]
    fn update_password_sent_when_non_blank() {
        let update = UserUpdate {
            password: Some("nueva".into()),
            active: Some(false),
            ..UserUpdate::default()
        };
        assert_eq!(update.to_body(), json!({"password": "nueva", "activo": false}));
    }

    #[test]
    fn update_role_rules_for_units() {
        let to_admin = UserUpdate {
            role: Some(UserRole::Admin),
            career: Some("c1".into()),
            ..UserUpdate::default()
        };
        assert_eq!(
            to_admin.to_body(),
            json!({"rol": "Administrador", "carreraId": null, "areaId": null})
        );

        let to_user = UserUpdate {
            role: Some(UserRole::User),
            career: Some(String::new()),
            area: Some("a2".into()),
            ..UserUpdate::default()
        };
        assert_eq!(
            to_user.to_body(),
            json!({"rol": "Usuario", "carreraId": null, "areaId": "a2"})
        );
    }
}
