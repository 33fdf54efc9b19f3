//! The identity-provider seam.
//!
//! A provider owns credentials and the authoritative session. It pushes
//! [`AuthEvent`]s on a broadcast channel whenever the session changes, and
//! exposes the profile table the OAuth callback bootstraps.

use std::future::Future;

use hub_core::{Identity, UserMetadata, UserProfile};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::error::AuthError;

/// Capacity of the provider's event channel. Listeners that fall behind
/// this far receive a `Lagged` error and skip ahead.
pub const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Credentials held for a signed-in identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    /// Unix timestamp (seconds) at which `access_token` expires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    pub user: Identity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthEventKind {
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
}

impl AuthEventKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SignedIn => "signed_in",
            Self::SignedOut => "signed_out",
            Self::TokenRefreshed => "token_refreshed",
            Self::UserUpdated => "user_updated",
        }
    }
}

/// A session change pushed by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthEvent {
    pub kind: AuthEventKind,
    pub session: Option<AuthSession>,
}

impl AuthEvent {
    #[must_use]
    pub const fn new(kind: AuthEventKind, session: Option<AuthSession>) -> Self {
        Self { kind, session }
    }

    #[must_use]
    pub fn signed_out() -> Self {
        Self::new(AuthEventKind::SignedOut, None)
    }

    /// The identity this event carries; `None` means signed out.
    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.session.as_ref().map(|s| s.user.clone())
    }
}

/// Uniform result of a sign-in attempt. Failures are values, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuthOutcome {
    #[must_use]
    pub const fn succeeded() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

/// A hosted identity service.
///
/// Implementations must broadcast an [`AuthEvent`] for every session change
/// they cause, including sign-in, sign-out, OAuth code exchange and token
/// refresh.
pub trait IdentityProvider: Send + Sync + 'static {
    /// Register a new account. Returns the new identity even when the
    /// provider withholds a session pending email confirmation.
    fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: &UserMetadata,
    ) -> impl Future<Output = Result<Identity, AuthError>> + Send;

    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<AuthSession, AuthError>> + Send;

    fn sign_out(&self) -> impl Future<Output = Result<(), AuthError>> + Send;

    /// The session the provider currently holds, refreshing it if it is
    /// about to expire.
    fn current_session(&self) -> impl Future<Output = Result<Option<AuthSession>, AuthError>> + Send;

    /// Run the redirect-based sign-in with a third-party provider.
    /// `Ok(None)` means the user cancelled or the provider denied access.
    fn sign_in_with_oauth(
        &self,
        provider: &str,
    ) -> impl Future<Output = Result<Option<AuthSession>, AuthError>> + Send;

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;

    fn fetch_profile(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Option<UserProfile>, AuthError>> + Send;

    fn insert_profile(
        &self,
        profile: &UserProfile,
    ) -> impl Future<Output = Result<(), AuthError>> + Send;
}
