use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::identity::Identity;

/// The client's view of "who is signed in".
///
/// Starts as `{ user: None, loading: true }` and resolves once the session
/// manager has heard from the identity provider. Owned by the session
/// manager; every other component only reads it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Session {
    pub user: Option<Identity>,
    pub loading: bool,
}

impl Session {
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }

    #[must_use]
    pub const fn resolved(user: Option<Identity>) -> Self {
        Self {
            user,
            loading: false,
        }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        !self.loading && self.user.is_some()
    }

    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::initial()
    }
}
