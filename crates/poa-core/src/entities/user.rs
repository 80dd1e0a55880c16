use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::UserRole;
use crate::ids::RecordKey;
use crate::reference::Reference;

const fn default_active() -> bool {
    true
}

/// An account as returned by `/auth/me` and `/users`.
///
/// The password is write-only and never deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(flatten)]
    pub key: RecordKey,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "nombre", default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "apellido", default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(rename = "rol")]
    pub role: UserRole,
    #[serde(rename = "activo", default = "default_active")]
    pub active: bool,
    #[serde(rename = "carreraId", default, skip_serializing_if = "Option::is_none")]
    pub career: Option<Reference>,
    #[serde(rename = "areaId", default, skip_serializing_if = "Option::is_none")]
    pub area: Option<Reference>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

crate::impl_record!(User);

impl User {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// "Nombre Apellido", falling back to the username.
    #[must_use]
    pub fn display_name(&self) -> String {
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if full.is_empty() {
            self.username.clone()
        } else {
            full
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::ids::{Record, normalize_id};

    #[test]
    fn parses_me_payload_with_populated_career() {
        let user: User = serde_json::from_value(json!({
            "_id": "u1",
            "username": "ana",
            "nombre": "Ana",
            "apellido": "Pérez",
            "rol": "Usuario",
            "activo": true,
            "carreraId": {"_id": "c1", "nombre": "Ingeniería"},
            "areaId": null,
            "createdAt": "2024-03-01T10:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(user.record_id(), "u1");
        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.career.as_ref().map(Reference::id), Some("c1"));
        assert!(user.area.is_none());
        assert_eq!(user.display_name(), "Ana Pérez");
        assert!(user.created_at.is_some());
    }

    #[test]
    fn display_name_falls_back_to_username() {
        let user: User =
            serde_json::from_value(json!({"id": "1", "username": "ana", "rol": "Administrador"}))
                .unwrap();
        assert_eq!(user.display_name(), "ana");
        assert!(user.is_admin());
        assert!(user.active);
    }

    #[test]
    fn normalized_user_serializes_both_keys() {
        let user: User =
            serde_json::from_value(json!({"_id": "u9", "username": "x", "rol": "Usuario"}))
                .unwrap();
        let value = serde_json::to_value(normalize_id(user)).unwrap();
        assert_eq!(value["id"], "u9");
        assert_eq!(value["_id"], "u9");
    }
}
