use hub_core::Identity;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::HubContext;
use crate::output::output;

#[derive(Serialize)]
struct SignUpResponse {
    user: Identity,
    /// False while the provider waits for email confirmation.
    signed_in: bool,
    profile_created: bool,
}

pub async fn handle(
    name: &str,
    email: &str,
    password: &str,
    ctx: &HubContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let app = ctx.app()?;
    app.resolve_session().await;
    let result = app.session().sign_up(name, email, password).await;
    let signed_in = app.session().session().is_authenticated();
    app.shutdown();

    let user = result?;
    output(
        &SignUpResponse {
            user,
            signed_in,
            profile_created: true,
        },
        flags.format,
    )
}
