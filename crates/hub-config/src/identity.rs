//! Identity provider configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_callback_addr() -> String {
    "127.0.0.1:0".to_string()
}

fn default_oauth_provider() -> String {
    "github".to_string()
}

const fn default_callback_timeout_secs() -> u64 {
    120
}

fn default_profiles_table() -> String {
    "user_profiles".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IdentityConfig {
    /// Project URL of the hosted identity provider.
    #[serde(default)]
    pub url: String,

    /// Public (anon) API key sent with every provider request.
    #[serde(default)]
    pub anon_key: String,

    /// Local address the OAuth callback listener binds. Port 0 picks a free port.
    #[serde(default = "default_callback_addr")]
    pub callback_addr: String,

    /// OAuth provider used by `sign-in-oauth` when none is given.
    #[serde(default = "default_oauth_provider")]
    pub oauth_provider: String,

    /// How long to wait for the browser to come back, in seconds.
    #[serde(default = "default_callback_timeout_secs")]
    pub callback_timeout_secs: u64,

    /// Where sign-up confirmation emails link to. Omitted when empty.
    #[serde(default)]
    pub email_redirect_url: String,

    /// Table holding one profile row per identity.
    #[serde(default = "default_profiles_table")]
    pub profiles_table: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            callback_addr: default_callback_addr(),
            oauth_provider: default_oauth_provider(),
            callback_timeout_secs: default_callback_timeout_secs(),
            email_redirect_url: String::new(),
            profiles_table: default_profiles_table(),
        }
    }
}

impl IdentityConfig {
    /// Check if the provider URL and key are both set.
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.anon_key.is_empty()
    }

    /// Borrow the config only if it is usable.
    pub fn require(&self) -> Result<&Self, ConfigError> {
        if self.is_configured() {
            Ok(self)
        } else {
            let missing = [("url", &self.url), ("anon_key", &self.anon_key)]
                .into_iter()
                .filter(|(_, value)| value.is_empty())
                .map(|(key, _)| key)
                .collect();
            Err(ConfigError::Unconfigured {
                section: "identity",
                missing,
            })
        }
    }

    /// Provider URL without trailing slashes.
    pub fn base(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    pub fn callback_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.callback_timeout_secs)
    }
}
