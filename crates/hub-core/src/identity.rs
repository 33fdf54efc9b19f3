use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Author name used when an idea or identity carries no usable name.
pub const ANONYMOUS: &str = "Anonymous";

/// Profile name used when an OAuth identity carries no name metadata.
pub const DEFAULT_PROFILE_NAME: &str = "User";

/// An authenticated user as reported by the identity provider.
///
/// Produced by `hub-auth`, read by everything else. Contains only data
/// fields, no provider calls.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Identity {
    /// Provider-assigned user id. Keys the `user_profiles` record.
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "user_metadata")]
    pub metadata: UserMetadata,
}

/// Free-form metadata attached at sign-up or by an OAuth provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Identity {
    #[must_use]
    pub fn new(id: impl Into<String>, email: Option<String>) -> Self {
        Self {
            id: id.into(),
            email,
            metadata: UserMetadata::default(),
        }
    }

    /// Name attached to ideas this identity creates.
    ///
    /// `full_name` metadata, else the local part of the email, else `Anonymous`.
    #[must_use]
    pub fn author_name(&self) -> String {
        non_empty(self.metadata.full_name.as_deref())
            .or_else(|| {
                self.email
                    .as_deref()
                    .and_then(|email| non_empty(email.split('@').next()))
            })
            .unwrap_or(ANONYMOUS)
            .to_string()
    }

    /// Name written to a freshly bootstrapped profile record.
    ///
    /// `full_name` metadata, else `name` metadata, else `User`.
    #[must_use]
    pub fn profile_name(&self) -> String {
        non_empty(self.metadata.full_name.as_deref())
            .or_else(|| non_empty(self.metadata.name.as_deref()))
            .unwrap_or(DEFAULT_PROFILE_NAME)
            .to_string()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
