use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::HubContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &HubContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Ideas { action } => commands::ideas::handle(&action, ctx, flags).await,
        Commands::Stats => commands::stats::handle(ctx, flags).await,
        Commands::Landing => commands::landing::handle(ctx, flags).await,
        Commands::Auth { action } => commands::auth::handle(&action, ctx, flags).await,
        Commands::Route { path } => commands::route::handle(&path, ctx, flags).await,
        Commands::Categories => commands::categories::handle(flags),
    }
}
