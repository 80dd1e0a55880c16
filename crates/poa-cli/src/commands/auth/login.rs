use poa_session::AuthOutcome;

use super::SignedInResponse;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::LoginArgs;
use crate::commands::shared::parse::read_password;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(args: &LoginArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let password = read_password(args.password.as_deref(), args.password_stdin)?;

    match ctx.session.login(&args.username, &password).await {
        AuthOutcome::SignedIn(user) => output(&SignedInResponse::new(&user, ctx), flags.format),
        AuthOutcome::Failed(reason) => anyhow::bail!("login failed: {reason}"),
    }
}
