use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::PlanScope;
use crate::ids::RecordKey;

/// A strategic line (línea estratégica).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategicLine {
    #[serde(flatten)]
    pub key: RecordKey,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    /// Duration in months.
    #[serde(rename = "duracion", default)]
    pub duration_months: u32,
    #[serde(rename = "fechaInicio", default)]
    pub start_date: String,
    #[serde(rename = "fechaFin", default)]
    pub end_date: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub plan: PlanScope,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

crate::impl_record!(StrategicLine);
