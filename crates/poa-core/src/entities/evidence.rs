use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::EvidenceKind;
use crate::ids::RecordKey;
use crate::reference::Reference;

/// An uploaded evidence file backing an activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    #[serde(flatten)]
    pub key: RecordKey,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "tipo")]
    pub kind: EvidenceKind,
    /// Stored file name on the server.
    #[serde(rename = "archivo")]
    pub file: String,
    #[serde(rename = "nombreOriginal", default)]
    pub original_name: String,
    #[serde(rename = "mimeType", default)]
    pub mime_type: String,
    /// Size in bytes.
    #[serde(rename = "tamaño", default)]
    pub size: u64,
    #[serde(rename = "actividadId")]
    pub activity: Reference,
    #[serde(rename = "poaId")]
    pub plan: Reference,
    #[serde(rename = "uploadedBy", default, skip_serializing_if = "Option::is_none")]
    pub uploaded_by: Option<Reference>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

crate::impl_record!(Evidence);
