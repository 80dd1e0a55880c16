use serde::Serialize;

use poa_client::users::{NewUser, UserUpdate};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::UserCommands;
use crate::commands::shared::session::require_admin;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct DeleteResponse<'a> {
    deleted: bool,
    id: &'a str,
}

/// Handle `poa users`. Every subcommand requires an administrator.
pub async fn handle(
    action: &UserCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let client = ctx.client();
    match action {
        UserCommands::List => {
            require_admin(ctx).await?;
            let mut users = ctx.checked(client.list_users().await)?;
            users.truncate(ctx.limit(flags));
            output(&users, flags.format)
        }
        UserCommands::Get { id } => {
            require_admin(ctx).await?;
            let user = ctx
                .checked(client.get_user(id).await)?
                .ok_or_else(|| anyhow::anyhow!("user '{id}' not found"))?;
            output(&user, flags.format)
        }
        UserCommands::Create {
            username,
            password,
            role,
            email,
            first_name,
            last_name,
            career,
            area,
        } => {
            let user = NewUser {
                username: username.clone(),
                password: password.clone(),
                role: *role,
                email: email.clone(),
                first_name: first_name.clone(),
                last_name: last_name.clone(),
                career: career.clone(),
                area: area.clone(),
            };
            // Local validation runs before the session check.
            user.to_body()?;
            require_admin(ctx).await?;
            let created = ctx.checked(client.create_user(&user).await)?;
            output(&created, flags.format)
        }
        UserCommands::Update {
            id,
            username,
            password,
            role,
            email,
            first_name,
            last_name,
            career,
            area,
            active,
        } => {
            let changes = UserUpdate {
                username: username.clone(),
                email: email.clone(),
                first_name: first_name.clone(),
                last_name: last_name.clone(),
                role: *role,
                active: *active,
                password: password.clone(),
                career: career.clone(),
                area: area.clone(),
            };
            require_admin(ctx).await?;
            let updated = ctx.checked(client.update_user(id, &changes).await)?;
            output(&updated, flags.format)
        }
        UserCommands::Delete { id } => {
            require_admin(ctx).await?;
            ctx.checked(client.delete_user(id).await)?;
            output(&DeleteResponse { deleted: true, id }, flags.format)
        }
    }
}
