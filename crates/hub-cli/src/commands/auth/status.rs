use hub_core::{GuardState, Identity};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::HubContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    guard: GuardState,
    user: Option<Identity>,
    token_source: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

pub async fn handle(ctx: &HubContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if !ctx.config.identity.is_configured() {
        return output(
            &AuthStatusResponse {
                authenticated: false,
                guard: GuardState::Unauthenticated,
                user: None,
                token_source: None,
                note: Some("IDEAHUB_IDENTITY__URL / IDEAHUB_IDENTITY__ANON_KEY not configured".into()),
            },
            flags.format,
        );
    }

    let app = ctx.app()?;
    let session = app.resolve_session().await;
    let guard = app.guard_state();
    let token_source = app.session().provider().store().source();
    app.shutdown();

    output(
        &AuthStatusResponse {
            authenticated: session.is_authenticated(),
            guard,
            user: session.user,
            token_source,
            note: None,
        },
        flags.format,
    )
}
