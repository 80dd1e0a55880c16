use serde::{Deserialize, Serialize};

use crate::enums::{Frequency, IndicatorStatus};
use crate::ids::RecordKey;
use crate::reference::Reference;

/// A measurable indicator attached to an objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    #[serde(flatten)]
    pub key: RecordKey,
    #[serde(rename = "lineaId")]
    pub line: Reference,
    #[serde(rename = "objetivoId")]
    pub objective: Reference,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    /// How the metric is computed.
    #[serde(rename = "calculo", default)]
    pub calculation: String,
    #[serde(rename = "codigo", default)]
    pub code: String,
    #[serde(rename = "frecuencia")]
    pub frequency: Frequency,
    #[serde(rename = "unidad", default)]
    pub unit: String,
    #[serde(rename = "meta", default)]
    pub target: f64,
    #[serde(rename = "estado")]
    pub status: IndicatorStatus,
}

crate::impl_record!(Indicator);
