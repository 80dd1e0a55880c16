//! Joins across fetched collections.
//!
//! The API populates foreign keys inconsistently, so every join here goes
//! through [`same_id`] / [`extract_id`] and gives the same answer whether a
//! reference arrived as a bare id or as a populated object.

use chrono::NaiveDate;
use serde::Serialize;

use poa_core::entities::{
    Activity, Area, Career, Evidence, Indicator, Objective, Plan, StrategicLine, User,
};
use poa_core::enums::{PlanKind, UserRole};
use poa_core::{Identify, Reference, extract_id, same_id};

/// Placeholder for a unit that cannot be resolved.
pub const UNKNOWN_UNIT: &str = "N/A";

#[must_use]
pub fn objectives_for_line<'a>(objectives: &'a [Objective], line_id: &str) -> Vec<&'a Objective> {
    objectives
        .iter()
        .filter(|objective| same_id(Some(&objective.line), Some(line_id)))
        .collect()
}

#[must_use]
pub fn indicators_for_objective<'a>(
    indicators: &'a [Indicator],
    objective_id: &str,
) -> Vec<&'a Indicator> {
    indicators
        .iter()
        .filter(|indicator| same_id(Some(&indicator.objective), Some(objective_id)))
        .collect()
}

/// Every activity of every plan, paired with its plan.
#[must_use]
pub fn plan_activities(plans: &[Plan]) -> Vec<(&Plan, &Activity)> {
    plans
        .iter()
        .flat_map(|plan| plan.activities.iter().map(move |activity| (plan, activity)))
        .collect()
}

/// Activities, across all plans, that work toward `objective_id`.
#[must_use]
pub fn activities_for_objective<'a>(
    plans: &'a [Plan],
    objective_id: &str,
) -> Vec<(&'a Plan, &'a Activity)> {
    plan_activities(plans)
        .into_iter()
        .filter(|(_, activity)| same_id(activity.objective.as_ref(), Some(objective_id)))
        .collect()
}

#[must_use]
pub fn evidence_for_activity<'a>(evidence: &'a [Evidence], activity_id: &str) -> Vec<&'a Evidence> {
    evidence
        .iter()
        .filter(|item| same_id(Some(&item.activity), Some(activity_id)))
        .collect()
}

/// The plan an evidence record belongs to, if it was fetched.
#[must_use]
pub fn plan_of_evidence<'a>(plans: &'a [Plan], evidence: &Evidence) -> Option<&'a Plan> {
    plans
        .iter()
        .find(|plan| same_id(Some(*plan), Some(&evidence.plan)))
}

/// Plans a user is allowed to work on.
///
/// Administrators see every plan. Plain users see career plans of their
/// career and area plans of their area; a user with neither sees nothing.
#[must_use]
pub fn plans_for_user<'a>(plans: &'a [Plan], user: &User) -> Vec<&'a Plan> {
    if user.role == UserRole::Admin {
        return plans.iter().collect();
    }
    plans
        .iter()
        .filter(|plan| match plan.kind {
            PlanKind::Career => same_id(plan.career.as_ref(), user.career.as_ref()),
            PlanKind::Area => same_id(plan.area.as_ref(), user.area.as_ref()),
        })
        .collect()
}

/// Headline counts for a set of plans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlanStats {
    pub total_plans: usize,
    /// Plans whose date window contains the reference day.
    pub active_plans: usize,
    pub total_activities: usize,
}

/// Count plans, plans running on `today`, and activities across them.
#[must_use]
pub fn plan_summary<'a, I>(plans: I, today: NaiveDate) -> PlanStats
where
    I: IntoIterator<Item = &'a Plan>,
{
    plans.into_iter().fold(PlanStats::default(), |stats, plan| PlanStats {
        total_plans: stats.total_plans + 1,
        active_plans: stats.active_plans + usize::from(plan.runs_on(today)),
        total_activities: stats.total_activities + plan.activities.len(),
    })
}

/// Display name of the career or area a plan belongs to.
///
/// Uses the populated name when the server expanded the reference, then
/// looks the id up in the given catalogs, then falls back to
/// [`UNKNOWN_UNIT`].
#[must_use]
pub fn unit_name(plan: &Plan, careers: &[Career], areas: &[Area]) -> String {
    let Some(unit) = plan.unit() else {
        return UNKNOWN_UNIT.to_string();
    };
    if let Some(name) = unit.display_name().filter(|name| !name.is_empty()) {
        return name.to_string();
    }
    let found = match plan.kind {
        PlanKind::Career => find_by_id(careers, unit).map(|career| career.name.as_str()),
        PlanKind::Area => find_by_id(areas, unit).map(|area| area.name.as_str()),
    };
    found.unwrap_or(UNKNOWN_UNIT).to_string()
}

fn find_by_id<'a, T: Identify>(records: &'a [T], reference: &Reference) -> Option<&'a T> {
    records
        .iter()
        .find(|record| same_id(Some(*record), Some(reference)))
}

/// Name lookup for a reference against a fetched catalog.
#[must_use]
pub fn resolve_name<'a, T, F>(records: &'a [T], reference: Option<&Reference>, name: F) -> Option<&'a str>
where
    T: Identify,
    F: Fn(&'a T) -> &'a str,
{
    let id = extract_id(reference);
    if id.is_empty() {
        return None;
    }
    records
        .iter()
        .find(|record| record.identity() == id)
        .map(name)
}

// ── Line tree ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct LineNode<'a> {
    pub line: &'a StrategicLine,
    pub objectives: Vec<ObjectiveNode<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ObjectiveNode<'a> {
    pub objective: &'a Objective,
    pub indicators: Vec<&'a Indicator>,
}

/// Line → objectives → indicators, in input order.
#[must_use]
pub fn line_tree<'a>(
    lines: &'a [StrategicLine],
    objectives: &'a [Objective],
    indicators: &'a [Indicator],
) -> Vec<LineNode<'a>> {
    lines
        .iter()
        .map(|line| LineNode {
            line,
            objectives: objectives_for_line(objectives, line.key.resolve())
                .into_iter()
                .map(|objective| ObjectiveNode {
                    objective,
                    indicators: indicators_for_objective(indicators, objective.key.resolve()),
                })
                .collect(),
        })
        .collect()
}
