//! Client-side routing table.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every location the application can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Landing,
    SignIn,
    SignUp,
    AuthCallback,
    LoginDashboard,
    Dashboard,
}

impl Route {
    pub const ALL: [Self; 6] = [
        Self::Landing,
        Self::SignIn,
        Self::SignUp,
        Self::AuthCallback,
        Self::LoginDashboard,
        Self::Dashboard,
    ];

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::SignIn => "/signin",
            Self::SignUp => "/signup",
            Self::AuthCallback => "/auth/callback",
            Self::LoginDashboard => "/logindashboard",
            Self::Dashboard => "/dashboard",
        }
    }

    /// Only the dashboard needs a signed-in identity.
    #[must_use]
    pub const fn is_protected(self) -> bool {
        matches!(self, Self::Dashboard)
    }

    /// Resolve a request path. Query string, fragment and a trailing slash are
    /// ignored; anything unknown falls back to the landing page.
    #[must_use]
    pub fn resolve(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Self::ALL
            .into_iter()
            .find(|route| route.path() == path)
            .unwrap_or(Self::Landing)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
