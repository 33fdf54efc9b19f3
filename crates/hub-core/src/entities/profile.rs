use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::identity::Identity;

/// One `user_profiles` row per identity, stored alongside the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UserProfile {
    pub id: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
}

impl UserProfile {
    /// Profile for a freshly created email/password identity.
    #[must_use]
    pub fn for_sign_up(identity: &Identity, full_name: &str) -> Self {
        Self {
            id: identity.id.clone(),
            full_name: Some(full_name.to_string()),
            email: identity.email.clone(),
        }
    }

    /// Profile for an OAuth identity seen for the first time at the callback.
    #[must_use]
    pub fn for_oauth(identity: &Identity) -> Self {
        Self {
            id: identity.id.clone(),
            full_name: Some(identity.profile_name()),
            email: identity.email.clone(),
        }
    }
}
