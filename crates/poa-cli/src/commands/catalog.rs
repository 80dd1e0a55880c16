//! Catalog entities: strategic lines, objectives, indicators, areas,
//! careers, faculties. Reads are public; writes require an administrator.

use serde::Serialize;
use serde_json::Value;

use poa_client::indicators::IndicatorFilter;
use poa_client::views::line_tree;
use poa_client::{ApiClient, ClientError};
use poa_core::entities::{Area, Career, Faculty, Indicator, Objective, Plan, StrategicLine};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{
    CareerCommands, CatalogCommands, IndicatorCommands, LineCommands, ObjectiveCommands,
    RecordCommands,
};
use crate::commands::shared::parse::parse_body;
use crate::commands::shared::session::{require_admin, require_user};
use crate::context::AppContext;
use crate::output::output;

/// One REST collection with the standard get/create/update/delete calls.
pub trait Resource {
    type Record: Serialize;

    /// Singular label for messages.
    const LABEL: &'static str;

    /// Reads need a signed-in user.
    const PROTECTED: bool = false;

    async fn get(client: &ApiClient, id: &str) -> Result<Option<Self::Record>, ClientError>;
    async fn create(client: &ApiClient, body: &Value) -> Result<Self::Record, ClientError>;
    async fn update(client: &ApiClient, id: &str, body: &Value)
    -> Result<Self::Record, ClientError>;
    async fn delete(client: &ApiClient, id: &str) -> Result<(), ClientError>;
}

macro_rules! resource {
    ($marker:ident, $record:ty, $label:literal, $get:ident, $create:ident, $update:ident, $delete:ident $(, protected = $protected:literal)?) => {
        pub struct $marker;

        impl Resource for $marker {
            type Record = $record;
            const LABEL: &'static str = $label;
            $(const PROTECTED: bool = $protected;)?

            async fn get(client: &ApiClient, id: &str) -> Result<Option<$record>, ClientError> {
                client.$get(id).await
            }

            async fn create(client: &ApiClient, body: &Value) -> Result<$record, ClientError> {
                client.$create(body).await
            }

            async fn update(
                client: &ApiClient,
                id: &str,
                body: &Value,
            ) -> Result<$record, ClientError> {
                client.$update(id, body).await
            }

            async fn delete(client: &ApiClient, id: &str) -> Result<(), ClientError> {
                client.$delete(id).await
            }
        }
    };
}

resource!(Lines, StrategicLine, "line", get_line, create_line, update_line, delete_line);
resource!(Objectives, Objective, "objective", get_objective, create_objective, update_objective, delete_objective);
resource!(Indicators, Indicator, "indicator", get_indicator, create_indicator, update_indicator, delete_indicator);
resource!(Areas, Area, "area", get_area, create_area, update_area, delete_area);
resource!(Careers, Career, "career", get_career, create_career, update_career, delete_career);
resource!(Faculties, Faculty, "faculty", get_faculty, create_faculty, update_faculty, delete_faculty);
resource!(Plans, Plan, "plan", get_plan, create_plan, update_plan, delete_plan, protected = true);

#[derive(Debug, Serialize)]
struct DeleteResponse<'a> {
    deleted: bool,
    id: &'a str,
}

/// `get | create | update | delete` for any [`Resource`].
pub async fn run_record<R: Resource>(
    action: &RecordCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        RecordCommands::Get { id } => {
            if R::PROTECTED {
                require_user(ctx).await?;
            }
            let record = ctx
                .checked(R::get(ctx.client(), id).await)?
                .ok_or_else(|| anyhow::anyhow!("{} '{id}' not found", R::LABEL))?;
            output(&record, flags.format)
        }
        RecordCommands::Create { json } => {
            let body = parse_body(json)?;
            require_admin(ctx).await?;
            let record = ctx.checked(R::create(ctx.client(), &body).await)?;
            output(&record, flags.format)
        }
        RecordCommands::Update { id, json } => {
            let body = parse_body(json)?;
            require_admin(ctx).await?;
            let record = ctx.checked(R::update(ctx.client(), id, &body).await)?;
            output(&record, flags.format)
        }
        RecordCommands::Delete { id } => {
            require_admin(ctx).await?;
            ctx.checked(R::delete(ctx.client(), id).await)?;
            output(&DeleteResponse { deleted: true, id }, flags.format)
        }
    }
}

fn limited<T>(mut records: Vec<T>, ctx: &AppContext, flags: &GlobalFlags) -> Vec<T> {
    records.truncate(ctx.limit(flags));
    records
}

/// Handle `poa lines`.
pub async fn handle_lines(
    action: &LineCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        LineCommands::List => {
            let lines = ctx.checked(ctx.client().list_lines().await)?;
            output(&limited(lines, ctx, flags), flags.format)
        }
        LineCommands::Tree => tree(ctx, flags).await,
        LineCommands::Record(action) => run_record::<Lines>(action, ctx, flags).await,
    }
}

#[derive(Debug, Serialize)]
struct TreeRow<'a> {
    linea: &'a str,
    objetivo: Option<&'a str>,
    indicador: Option<&'a str>,
}

async fn tree(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let client = ctx.client();
    let (lines, objectives, indicators) = tokio::join!(
        client.list_lines(),
        client.list_objectives(None),
        client.list_indicators(IndicatorFilter::default()),
    );
    let lines = ctx.checked(lines)?;
    let objectives = ctx.checked(objectives)?;
    let indicators = ctx.checked(indicators)?;

    let tree = line_tree(&lines, &objectives, &indicators);
    if flags.format != crate::cli::OutputFormat::Table {
        return output(&tree, flags.format);
    }

    let mut rows = Vec::new();
    for node in &tree {
        if node.objectives.is_empty() {
            rows.push(TreeRow {
                linea: &node.line.name,
                objetivo: None,
                indicador: None,
            });
        }
        for branch in &node.objectives {
            if branch.indicators.is_empty() {
                rows.push(TreeRow {
                    linea: &node.line.name,
                    objetivo: Some(branch.objective.name.as_str()),
                    indicador: None,
                });
            }
            for indicator in &branch.indicators {
                rows.push(TreeRow {
                    linea: &node.line.name,
                    objetivo: Some(branch.objective.name.as_str()),
                    indicador: Some(indicator.name.as_str()),
                });
            }
        }
    }
    output(&rows, flags.format)
}

/// Handle `poa objectives`.
pub async fn handle_objectives(
    action: &ObjectiveCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ObjectiveCommands::List { line } => {
            let objectives = ctx.checked(ctx.client().list_objectives(line.as_deref()).await)?;
            output(&limited(objectives, ctx, flags), flags.format)
        }
        ObjectiveCommands::Record(action) => run_record::<Objectives>(action, ctx, flags).await,
    }
}

/// Handle `poa indicators`.
pub async fn handle_indicators(
    action: &IndicatorCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        IndicatorCommands::List { objective, line } => {
            let filter = IndicatorFilter {
                objective: objective.as_deref(),
                line: line.as_deref(),
            };
            let indicators = ctx.checked(ctx.client().list_indicators(filter).await)?;
            output(&limited(indicators, ctx, flags), flags.format)
        }
        IndicatorCommands::Record(action) => run_record::<Indicators>(action, ctx, flags).await,
    }
}

/// Handle `poa careers`.
pub async fn handle_careers(
    action: &CareerCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        CareerCommands::List { faculty } => {
            let careers = ctx.checked(ctx.client().list_careers(faculty.as_deref()).await)?;
            output(&limited(careers, ctx, flags), flags.format)
        }
        CareerCommands::Record(action) => run_record::<Careers>(action, ctx, flags).await,
    }
}

/// Handle `poa areas`.
pub async fn handle_areas(
    action: &CatalogCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        CatalogCommands::List => {
            let areas = ctx.checked(ctx.client().list_areas().await)?;
            output(&limited(areas, ctx, flags), flags.format)
        }
        CatalogCommands::Record(action) => run_record::<Areas>(action, ctx, flags).await,
    }
}

/// Handle `poa faculties`.
pub async fn handle_faculties(
    action: &CatalogCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        CatalogCommands::List => {
            let faculties = ctx.checked(ctx.client().list_faculties().await)?;
            output(&limited(faculties, ctx, flags), flags.format)
        }
        CatalogCommands::Record(action) => run_record::<Faculties>(action, ctx, flags).await,
    }
}
