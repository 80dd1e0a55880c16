use serde::Serialize;

use poa_client::views::{plan_summary, plans_for_user, unit_name};
use poa_core::entities::Plan;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{ActivityCommands, PlanCommands};
use crate::commands::catalog::{Plans, run_record};
use crate::commands::shared::parse::parse_body;
use crate::commands::shared::session::require_user;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct PlanSummary {
    id: String,
    tipo: String,
    unidad: String,
    periodo: i32,
    actividades: usize,
}

/// Handle `poa plans`.
pub async fn handle(
    action: &PlanCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        PlanCommands::List => {
            require_user(ctx).await?;
            let mut plans = ctx.checked(ctx.client().list_plans().await)?;
            plans.truncate(ctx.limit(flags));
            output(&plans, flags.format)
        }
        PlanCommands::Mine => mine(ctx, flags).await,
        PlanCommands::Summary => {
            let user = require_user(ctx).await?;
            let plans = ctx.checked(ctx.client().list_plans().await)?;
            let today = chrono::Local::now().date_naive();
            output(&plan_summary(plans_for_user(&plans, &user), today), flags.format)
        }
        PlanCommands::Activity { action } => activity(action, ctx, flags).await,
        PlanCommands::Record(action) => run_record::<Plans>(action, ctx, flags).await,
    }
}

async fn mine(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let user = require_user(ctx).await?;
    let client = ctx.client();
    let (plans, careers, areas) =
        tokio::join!(client.list_plans(), client.list_careers(None), client.list_areas());
    let plans = ctx.checked(plans)?;
    let careers = ctx.checked(careers)?;
    let areas = ctx.checked(areas)?;

    let summaries = plans_for_user(&plans, &user)
        .into_iter()
        .take(ctx.limit(flags))
        .map(|plan| summarize(plan, unit_name(plan, &careers, &areas)))
        .collect::<Vec<_>>();
    output(&summaries, flags.format)
}

fn summarize(plan: &Plan, unit: String) -> PlanSummary {
    PlanSummary {
        id: plan.key.resolve().to_string(),
        tipo: plan.kind.to_string(),
        unidad: unit,
        periodo: plan.period,
        actividades: plan.activities.len(),
    }
}

async fn activity(
    action: &ActivityCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let client = ctx.client();
    let plan = match action {
        ActivityCommands::Add { plan, json } => {
            let body = parse_body(json)?;
            require_user(ctx).await?;
            ctx.checked(client.add_activity(plan, &body).await)?
        }
        ActivityCommands::Update {
            plan,
            activity,
            json,
        } => {
            let body = parse_body(json)?;
            require_user(ctx).await?;
            ctx.checked(client.update_activity(plan, activity, &body).await)?
        }
        ActivityCommands::Remove { plan, activity } => {
            require_user(ctx).await?;
            ctx.checked(client.delete_activity(plan, activity).await)?
        }
    };
    output(&plan, flags.format)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn summary_counts_activities() {
        let plan: Plan = serde_json::from_value(json!({
            "_id": "p1",
            "tipo": "carrera",
            "carreraId": {"_id": "c1", "nombre": "Medicina"},
            "periodo": 2025,
            "actividades": [{
                "_id": "a1",
                "nombre": "Taller",
                "estado": "Pendiente",
                "frecuencia": "Anual"
            }]
        }))
        .unwrap();
        let summary = summarize(&plan, "Medicina".into());
        assert_eq!(summary.id, "p1");
        assert_eq!(summary.unidad, "Medicina");
        assert_eq!(summary.actividades, 1);
        assert_eq!(summary.periodo, 2025);
    }
}
