//! Navigation guard for protected views.
//!
//! ```text
//! unresolved ─(loading cleared, identity)──→ authenticated
//!            └(loading cleared, no identity)→ unauthenticated
//! authenticated ⇄ unauthenticated   (sign-in / sign-out notifications)
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::routes::Route;
use crate::session::Session;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum GuardState {
    #[default]
    Unresolved,
    Authenticated,
    Unauthenticated,
}

impl GuardState {
    #[must_use]
    pub const fn from_session(session: &Session) -> Self {
        if session.loading {
            Self::Unresolved
        } else if session.user.is_some() {
            Self::Authenticated
        } else {
            Self::Unauthenticated
        }
    }

    #[must_use]
    pub const fn permits_protected(self) -> bool {
        matches!(self, Self::Authenticated)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unresolved => "unresolved",
            Self::Authenticated => "authenticated",
            Self::Unauthenticated => "unauthenticated",
        }
    }
}

impl fmt::Display for GuardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the view layer should do for a requested route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "action", content = "route", rename_all = "snake_case")]
pub enum GuardDecision {
    /// Render the route.
    Render(Route),
    /// Session still resolving: show a neutral pending indicator.
    Pending,
    /// Not allowed: go here instead.
    Redirect(Route),
}

/// Tracks the guard state as session snapshots arrive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationGuard {
    state: GuardState,
}

impl NavigationGuard {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: GuardState::Unresolved,
        }
    }

    #[must_use]
    pub const fn state(&self) -> GuardState {
        self.state
    }

    /// Feed the latest session snapshot. Once resolved, the guard never goes
    /// back to `Unresolved`.
    pub fn observe(&mut self, session: &Session) -> GuardState {
        let next = GuardState::from_session(session);
        if next == self.state || next == GuardState::Unresolved {
            return self.state;
        }
        tracing::debug!(from = %self.state, to = %next, "navigation guard transition");
        self.state = next;
        self.state
    }

    #[must_use]
    pub const fn decide(&self, route: Route) -> GuardDecision {
        if !route.is_protected() {
            return GuardDecision::Render(route);
        }
        match self.state {
            GuardState::Unresolved => GuardDecision::Pending,
            GuardState::Authenticated => GuardDecision::Render(route),
            GuardState::Unauthenticated => GuardDecision::Redirect(Route::SignIn),
        }
    }
}
