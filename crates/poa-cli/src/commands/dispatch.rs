use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Auth { action } => commands::auth::handle(&action, ctx, flags).await,
        Commands::Lines { action } => commands::catalog::handle_lines(&action, ctx, flags).await,
        Commands::Objectives { action } => {
            commands::catalog::handle_objectives(&action, ctx, flags).await
        }
        Commands::Indicators { action } => {
            commands::catalog::handle_indicators(&action, ctx, flags).await
        }
        Commands::Areas { action } => commands::catalog::handle_areas(&action, ctx, flags).await,
        Commands::Careers { action } => {
            commands::catalog::handle_careers(&action, ctx, flags).await
        }
        Commands::Faculties { action } => {
            commands::catalog::handle_faculties(&action, ctx, flags).await
        }
        Commands::Plans { action } => commands::plans::handle(&action, ctx, flags).await,
        Commands::Evidence { action } => commands::evidence::handle(&action, ctx, flags).await,
        Commands::Users { action } => commands::users::handle(&action, ctx, flags).await,
    }
}
