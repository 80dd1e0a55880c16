//! Foreign-key references and the id extraction rule.
//!
//! The API returns foreign keys in two shapes depending on whether the
//! server populated the relation:
//!
//! ```text
//! "lineaId": "665f1c..."                                  → Reference::Id
//! "lineaId": { "_id": "665f1c...", "nombre": "Docencia" } → Reference::Populated
//! ```
//!
//! Both denote the same entity, and [`Reference::id`] resolves both to the
//! same string.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A foreign-key field as served by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    /// Bare identifier.
    Id(String),
    /// Populated sub-object. `id` is empty when the object carried neither
    /// `_id` nor `id`.
    Populated {
        id: String,
        display_name: Option<String>,
    },
}

impl Reference {
    /// Canonical identifier, independent of representation.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) | Self::Populated { id, .. } => id,
        }
    }

    /// Display name carried by a populated reference.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        match self {
            Self::Id(_) => None,
            Self::Populated { display_name, .. } => display_name.as_deref(),
        }
    }

    #[must_use]
    pub const fn is_populated(&self) -> bool {
        matches!(self, Self::Populated { .. })
    }
}

impl From<&str> for Reference {
    fn from(id: &str) -> Self {
        Self::Id(id.to_string())
    }
}

impl From<String> for Reference {
    fn from(id: String) -> Self {
        Self::Id(id)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawReference {
    Id(String),
    Object(PopulatedFields),
}

#[derive(Deserialize)]
struct PopulatedFields {
    #[serde(rename = "_id", default)]
    mongo_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    nombre: Option<String>,
    #[serde(default)]
    username: Option<String>,
}

impl<'de> Deserialize<'de> for Reference {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawReference::deserialize(deserializer)? {
            RawReference::Id(id) => Self::Id(id),
            RawReference::Object(fields) => {
                let id = first_non_empty(fields.mongo_id, fields.id).unwrap_or_default();
                Self::Populated {
                    id,
                    display_name: fields.nombre.or(fields.username),
                }
            }
        })
    }
}

/// Request bodies always carry the bare id; a populated display name is
/// dropped on the way out.
impl Serialize for Reference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

pub(crate) fn first_non_empty(preferred: Option<String>, fallback: Option<String>) -> Option<String> {
    preferred
        .filter(|value| !value.is_empty())
        .or_else(|| fallback.filter(|value| !value.is_empty()))
}

// ---------------------------------------------------------------------------
// Identify
// ---------------------------------------------------------------------------

/// Anything that resolves to a canonical entity id.
pub trait Identify {
    fn identity(&self) -> &str;
}

impl Identify for str {
    fn identity(&self) -> &str {
        self
    }
}

impl Identify for String {
    fn identity(&self) -> &str {
        self
    }
}

impl Identify for Reference {
    fn identity(&self) -> &str {
        self.id()
    }
}

/// Canonical id of an optional reference or record; empty when absent.
///
/// ```
/// use poa_core::{Reference, extract_id};
///
/// let bare = Reference::from("objetivo1");
/// let populated = Reference::Populated {
///     id: "objetivo1".into(),
///     display_name: Some("Reducir consumo".into()),
/// };
/// assert_eq!(extract_id(Some(&bare)), "objetivo1");
/// assert_eq!(extract_id(Some(&populated)), "objetivo1");
/// assert_eq!(extract_id::<Reference>(None), "");
/// ```
#[must_use]
pub fn extract_id<T: Identify + ?Sized>(value: Option<&T>) -> &str {
    value.map_or("", Identify::identity)
}

/// Whether two references denote the same entity. Empty ids never match.
#[must_use]
pub fn same_id<A: Identify + ?Sized, B: Identify + ?Sized>(a: Option<&A>, b: Option<&B>) -> bool {
    let left = extract_id(a);
    !left.is_empty() && left == extract_id(b)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn bare_string_deserializes_as_id() {
        let reference: Reference = serde_json::from_value(json!("linea1")).unwrap();
        assert_eq!(reference, Reference::Id("linea1".into()));
        assert!(!reference.is_populated());
    }

    #[test]
    fn populated_object_prefers_mongo_id() {
        let reference: Reference =
            serde_json::from_value(json!({"_id": "a", "id": "b", "nombre": "Docencia"})).unwrap();
        assert_eq!(reference.id(), "a");
        assert_eq!(reference.display_name(), Some("Docencia"));
    }

    #[test]
    fn populated_object_falls_back_to_plain_id() {
        let reference: Reference = serde_json::from_value(json!({"id": "b"})).unwrap();
        assert_eq!(reference.id(), "b");
        assert_eq!(reference.display_name(), None);
    }

    #[test]
    fn empty_mongo_id_falls_back_to_plain_id() {
        let reference: Reference = serde_json::from_value(json!({"_id": "", "id": "b"})).unwrap();
        assert_eq!(reference.id(), "b");
    }

    #[test]
    fn object_without_ids_resolves_to_empty() {
        let reference: Reference = serde_json::from_value(json!({"nombre": "x"})).unwrap();
        assert_eq!(reference.id(), "");
    }

    #[test]
    fn uploader_uses_username_as_display_name() {
        let reference: Reference =
            serde_json::from_value(json!({"_id": "u1", "username": "ana"})).unwrap();
        assert_eq!(reference.display_name(), Some("ana"));
    }

    #[test]
    fn serializes_as_bare_id() {
        let reference = Reference::Populated {
            id: "x1".into(),
            display_name: Some("Nombre".into()),
        };
        assert_eq!(serde_json::to_value(&reference).unwrap(), json!("x1"));
    }

    #[test]
    fn same_id_ignores_representation() {
        let bare = Reference::from("p1");
        let populated = Reference::Populated {
            id: "p1".into(),
            display_name: None,
        };
        assert!(same_id(Some(&bare), Some(&populated)));
        assert!(same_id(Some(&populated), Some("p1")));
    }

    #[test]
    fn same_id_never_matches_empty() {
        assert!(!same_id::<str, str>(Some(""), Some("")));
        assert!(!same_id::<Reference, str>(None, Some("")));
    }
}
