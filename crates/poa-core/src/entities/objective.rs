use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::RecordKey;
use crate::reference::Reference;

/// An objective under a strategic line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objective {
    #[serde(flatten)]
    pub key: RecordKey,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "codigoReferencia", default)]
    pub reference_code: String,
    /// Parent line; populated when the server expands the relation.
    #[serde(rename = "lineaId")]
    pub line: Reference,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

crate::impl_record!(Objective);
