use hub_core::{GuardDecision, GuardState, NavigationGuard, Route, Session};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::HubContext;
use crate::output::output;

#[derive(Debug, Serialize, PartialEq, Eq)]
struct RouteResponse {
    requested: String,
    route: Route,
    guard: GuardState,
    decision: GuardDecision,
    /// Path actually shown, or `None` while the session is pending.
    destination: Option<&'static str>,
}

pub async fn handle(path: &str, ctx: &HubContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = ctx.current_session().await?;
    output(&navigate(path, &session), flags.format)
}

fn navigate(path: &str, session: &Session) -> RouteResponse {
    let mut guard = NavigationGuard::new();
    let state = guard.observe(session);
    let route = Route::resolve(path);
    let decision = guard.decide(route);
    let destination = match decision {
        GuardDecision::Render(to) | GuardDecision::Redirect(to) => Some(to.path()),
        GuardDecision::Pending => None,
    };
    RouteResponse {
        requested: path.to_string(),
        route,
        guard: state,
        decision,
        destination,
    }
}
