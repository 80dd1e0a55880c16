mod login;
mod logout;
mod register;
mod status;

use serde::Serialize;

use poa_core::entities::User;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;
use crate::context::AppContext;

/// Handle `poa auth <subcommand>`.
pub async fn handle(
    action: &AuthCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login(args) => login::handle(args, ctx, flags).await,
        AuthCommands::Register(args) => register::handle(args, ctx, flags).await,
        AuthCommands::Logout => logout::handle(ctx, flags),
        AuthCommands::Status { verify } => status::handle(*verify, ctx, flags).await,
    }
}

#[derive(Debug, Serialize)]
struct SignedInResponse {
    authenticated: bool,
    username: String,
    name: String,
    role: String,
    token_source: Option<String>,
}

impl SignedInResponse {
    fn new(user: &User, ctx: &AppContext) -> Self {
        Self {
            authenticated: true,
            username: user.username.clone(),
            name: user.display_name(),
            role: user.role.to_string(),
            token_source: ctx.session.token_source().map(|source| source.to_string()),
        }
    }
}
