//! Remote idea/stats API configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the REST API (no trailing path).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Base URL without trailing slashes.
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Root of the idea collection endpoints.
    pub fn ideas_url(&self) -> String {
        format!("{}/ideas", self.base())
    }

    pub fn stats_url(&self) -> String {
        format!("{}/stats", self.base())
    }

    /// Reject base URLs reqwest cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.base();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                key: "api.base_url",
                reason: format!("expected an http(s) URL, got '{}'", self.base_url),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "api.timeout_secs",
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}
