use hub_auth::{AuthError, CallbackOutcome, IdentityProvider, SessionManager, resolve_callback};

use crate::cli::GlobalFlags;
use crate::context::HubContext;
use crate::output::output;

pub async fn handle(provider: Option<&str>, ctx: &HubContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let provider = provider.unwrap_or(&ctx.config.identity.oauth_provider);
    let app = ctx.app()?;
    app.resolve_session().await;

    if !flags.quiet {
        eprintln!("Opening the browser to sign in with {provider}...");
    }
    let outcome = sign_in_and_settle(app.session(), provider).await;
    app.shutdown();

    output(&outcome?, flags.format)
}

/// Run the redirect flow, then settle the callback the way the landing page
/// would. A cancelled flow is not a failure: it settles to the sign-in route.
async fn sign_in_and_settle<P: IdentityProvider>(
    manager: &SessionManager<P>,
    provider: &str,
) -> Result<CallbackOutcome, AuthError> {
    if manager.sign_in_with_oauth(provider).await?.is_none() {
        tracing::info!(provider, "oauth sign-in cancelled");
    }
    Ok(resolve_callback(manager).await)
}
