use serde::Serialize;

use poa_client::evidence::{EvidencePatch, EvidenceUpload};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::EvidenceCommands;
use crate::commands::shared::session::require_user;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct UrlResponse {
    url: String,
}

#[derive(Debug, Serialize)]
struct DeleteResponse<'a> {
    deleted: bool,
    id: &'a str,
}

/// Handle `poa evidence`.
pub async fn handle(
    action: &EvidenceCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let client = ctx.client();
    match action {
        EvidenceCommands::Url { file } => output(
            &UrlResponse {
                url: client.file_url(file),
            },
            flags.format,
        ),
        EvidenceCommands::List { activity, plan } => {
            require_user(ctx).await?;
            let mut evidence = ctx.checked(
                client
                    .list_evidence(activity.as_deref(), plan.as_deref())
                    .await,
            )?;
            evidence.truncate(ctx.limit(flags));
            output(&evidence, flags.format)
        }
        EvidenceCommands::Get { id } => {
            require_user(ctx).await?;
            let evidence = ctx
                .checked(client.get_evidence(id).await)?
                .ok_or_else(|| anyhow::anyhow!("evidence '{id}' not found"))?;
            output(&evidence, flags.format)
        }
        EvidenceCommands::Upload {
            file,
            activity,
            plan,
            name,
            description,
        } => {
            require_user(ctx).await?;
            let upload = EvidenceUpload {
                path: file.clone(),
                activity: activity.clone(),
                plan: plan.clone(),
                name: name.clone(),
                description: description.clone(),
            };
            let evidence = ctx.checked(client.upload_evidence(&upload).await)?;
            output(&evidence, flags.format)
        }
        EvidenceCommands::Update {
            id,
            name,
            description,
        } => {
            let patch = EvidencePatch {
                name: name.clone(),
                description: description.clone(),
            };
            if patch.is_empty() {
                anyhow::bail!("nothing to update: pass --name and/or --description");
            }
            require_user(ctx).await?;
            let evidence = ctx.checked(client.update_evidence(id, &patch).await)?;
            output(&evidence, flags.format)
        }
        EvidenceCommands::Delete { id } => {
            require_user(ctx).await?;
            ctx.checked(client.delete_evidence(id).await)?;
            output(&DeleteResponse { deleted: true, id }, flags.format)
        }
    }
}
