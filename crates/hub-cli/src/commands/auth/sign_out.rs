use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::HubContext;
use crate::output::output;

#[derive(Serialize)]
struct SignOutResponse {
    signed_out: bool,
    was_signed_in: bool,
}

pub async fn handle(ctx: &HubContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let app = ctx.app()?;
    let was_signed_in = app.resolve_session().await.is_authenticated();
    let result = app.session().sign_out().await;
    app.shutdown();

    result?;
    output(
        &SignOutResponse {
            signed_out: true,
            was_signed_in,
        },
        flags.format,
    )
}
