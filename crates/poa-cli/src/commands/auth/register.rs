use poa_client::auth::Registration;
use poa_session::AuthOutcome;

use super::SignedInResponse;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::RegisterArgs;
use crate::commands::shared::parse::read_password;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(
    args: &RegisterArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let registration = Registration {
        username: args.username.clone(),
        password: read_password(args.password.as_deref(), args.password_stdin)?,
        email: args.email.clone(),
        first_name: args.first_name.clone(),
        last_name: args.last_name.clone(),
        career: args.career.clone(),
        area: args.area.clone(),
    };

    match ctx.session.register(&registration).await {
        AuthOutcome::SignedIn(user) => output(&SignedInResponse::new(&user, ctx), flags.format),
        AuthOutcome::Failed(reason) => anyhow::bail!("registration failed: {reason}"),
    }
}
