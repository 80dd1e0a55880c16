use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::enums::{ActivityStatus, Frequency, PlanKind};
use crate::ids::{Record, RecordKey, normalize_id};
use crate::reference::Reference;

/// An annual operational plan (POA) for one career or area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(flatten)]
    pub key: RecordKey,
    #[serde(rename = "tipo")]
    pub kind: PlanKind,
    #[serde(rename = "areaId", default, skip_serializing_if = "Option::is_none")]
    pub area: Option<Reference>,
    #[serde(rename = "carreraId", default, skip_serializing_if = "Option::is_none")]
    pub career: Option<Reference>,
    /// Plan year.
    #[serde(rename = "periodo")]
    pub period: i32,
    #[serde(rename = "fechaInicio", default)]
    pub start_date: String,
    #[serde(rename = "fechaFin", default)]
    pub end_date: String,
    #[serde(rename = "actividades", default)]
    pub activities: Vec<Activity>,
}

impl Plan {
    /// The unit this plan belongs to, according to its kind.
    #[must_use]
    pub fn unit(&self) -> Option<&Reference> {
        match self.kind {
            PlanKind::Career => self.career.as_ref(),
            PlanKind::Area => self.area.as_ref(),
        }
    }

    #[must_use]
    pub fn activity(&self, activity_id: &str) -> Option<&Activity> {
        self.activities
            .iter()
            .find(|activity| activity.key.resolve() == activity_id)
    }

    /// Whether `day` falls inside `fechaInicio..=fechaFin`. A plan with a
    /// missing or unreadable bound is never running.
    #[must_use]
    pub fn runs_on(&self, day: NaiveDate) -> bool {
        match (calendar_day(&self.start_date), calendar_day(&self.end_date)) {
            (Some(start), Some(end)) => start <= day && day <= end,
            _ => false,
        }
    }
}

/// Calendar day of an API date: `YYYY-MM-DD` or an RFC 3339 timestamp (UTC day).
fn calendar_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.naive_utc().date());
    }
    NaiveDate::parse_from_str(raw.get(..10)?, "%Y-%m-%d").ok()
}

impl Record for Plan {
    fn key(&self) -> &RecordKey {
        &self.key
    }

    fn key_mut(&mut self) -> &mut RecordKey {
        &mut self.key
    }

    fn normalize_nested(&mut self) {
        let activities = std::mem::take(&mut self.activities);
        self.activities = activities.into_iter().map(normalize_id).collect();
    }
}

impl crate::reference::Identify for Plan {
    fn identity(&self) -> &str {
        self.key.resolve()
    }
}

/// An activity inside a plan. Dates default to the plan's period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(flatten)]
    pub key: RecordKey,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "fechaInicio", default)]
    pub start_date: String,
    #[serde(rename = "fechaFin", default)]
    pub end_date: String,
    #[serde(rename = "responsable", default)]
    pub responsible: String,
    #[serde(rename = "estado")]
    pub status: ActivityStatus,
    #[serde(rename = "frecuencia")]
    pub frequency: Frequency,
    #[serde(rename = "lineaId", default, skip_serializing_if = "Option::is_none")]
    pub line: Option<Reference>,
    #[serde(rename = "objetivoId", default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<Reference>,
    #[serde(rename = "indicadorId", default, skip_serializing_if = "Option::is_none")]
    pub indicator: Option<Reference>,
}

crate::impl_record!(Activity);

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn sample() -> serde_json::Value {
        json!({
            "_id": "poa1",
            "tipo": "carrera",
            "carreraId": {"_id": "c1", "nombre": "Ingeniería Civil"},
            "periodo": 2025,
            "fechaInicio": "2025-01-01",
            "fechaFin": "2025-12-31",
            "actividades": [{
                "_id": "act1",
                "nombre": "Taller",
                "estado": "En Progreso",
                "frecuencia": "Trimestral",
                "objetivoId": "obj1"
            }]
        })
    }

    #[test]
    fn missing_activities_default_to_empty() {
        let plan: Plan = serde_json::from_value(
            json!({"_id": "p", "tipo": "area", "areaId": "a1", "periodo": 2024}),
        )
        .unwrap();
        assert!(plan.activities.is_empty());
        assert_eq!(plan.unit().map(Reference::id), Some("a1"));
    }

    #[test]
    fn normalize_reaches_activities() {
        let plan: Plan = serde_json::from_value(sample()).unwrap();
        let plan = normalize_id(plan);
        assert_eq!(plan.key, RecordKey::both("poa1"));
        assert_eq!(plan.activities[0].key, RecordKey::both("act1"));
        assert!(plan.activity("act1").is_some());
    }

    #[test]
    fn runs_on_includes_both_bounds() {
        let plan: Plan = serde_json::from_value(sample()).unwrap();
        let day = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        assert!(plan.runs_on(day(2025, 1, 1)));
        assert!(plan.runs_on(day(2025, 12, 31)));
        assert!(!plan.runs_on(day(2024, 12, 31)));
        assert!(!plan.runs_on(day(2026, 1, 1)));
    }

    #[test]
    fn runs_on_reads_timestamps_and_rejects_missing_dates() {
        let mut plan: Plan = serde_json::from_value(sample()).unwrap();
        plan.start_date = "2025-03-01T00:00:00.000Z".into();
        plan.end_date = "2025-03-31T23:59:59.999Z".into();
        assert!(plan.runs_on(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()));

        plan.end_date = String::new();
        assert!(!plan.runs_on(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()));
    }

    #[test]
    fn unit_follows_kind() {
        let plan: Plan = serde_json::from_value(sample()).unwrap();
        let unit = plan.unit().expect("career plan has a career");
        assert_eq!(unit.id(), "c1");
        assert_eq!(unit.display_name(), Some("Ingeniería Civil"));
    }
}
