use hub_auth::IdentityProvider;
use hub_core::Identity;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::HubContext;
use crate::output::output;

#[derive(Serialize)]
struct SignInResponse {
    authenticated: bool,
    user: Option<Identity>,
    token_source: Option<&'static str>,
}

pub async fn handle(email: &str, password: &str, ctx: &HubContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let app = ctx.app()?;
    app.resolve_session().await;

    let outcome = app.session().sign_in(email, password).await;
    if let Some(message) = outcome.error {
        app.shutdown();
        anyhow::bail!("sign-in failed: {message}");
    }

    let provider = app.session().provider();
    let session = provider.current_session().await;
    let token_source = provider.store().source();
    app.shutdown();

    let user = session?.map(|s| s.user);
    output(
        &SignInResponse {
            authenticated: user.is_some(),
            user,
            token_source,
        },
        flags.format,
    )
}
