use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Expected sign-in failure (wrong password, unknown account). Carries the
    /// provider's message.
    #[error("{0}")]
    InvalidCredentials(String),

    #[error("not signed in; run `ideahub auth sign-in`")]
    NotAuthenticated,

    /// The provider answered with an unexpected status.
    #[error("identity provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The identity exists but its profile record could not be written.
    #[error("profile setup failed for {user_id}: {reason}")]
    ProfileBootstrap { user_id: String, reason: String },

    #[error("browser sign-in failed: {0}")]
    BrowserFlowFailed(String),

    #[error("session store error: {0}")]
    TokenStoreError(String),

    #[error("identity provider is not configured: {0}")]
    NotConfigured(String),

    #[error("{0}")]
    Other(String),
}

impl AuthError {
    /// Text suitable for inline feedback next to a form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidCredentials(message) | Self::Provider { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
