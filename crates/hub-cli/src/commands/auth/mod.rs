mod oauth;
mod sign_in;
mod sign_out;
mod sign_up;
mod status;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;
use crate::context::HubContext;

/// Handle `ideahub auth`.
pub async fn handle(action: &AuthCommands, ctx: &HubContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        AuthCommands::SignUp {
            name,
            email,
            password,
        } => sign_up::handle(name, email, password, ctx, flags).await,
        AuthCommands::SignIn { email, password } => sign_in::handle(email, password, ctx, flags).await,
        AuthCommands::SignInOauth { provider } => oauth::handle(provider.as_deref(), ctx, flags).await,
        AuthCommands::SignOut => sign_out::handle(ctx, flags).await,
        AuthCommands::Status => status::handle(ctx, flags).await,
    }
}
