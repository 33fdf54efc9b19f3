//! # hub-config
//!
//! Layered configuration loading for IdeaHub using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`IDEAHUB_*` prefix, `__` as separator)
//! 2. Project-level `.ideahub/config.toml`
//! 3. User-level `~/.config/ideahub/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `IDEAHUB_API__BASE_URL` -> `api.base_url`,
//! `IDEAHUB_IDENTITY__ANON_KEY` -> `identity.anon_key`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use hub_config::HubConfig;
//!
//! let config = HubConfig::load_with_dotenv().expect("config");
//! println!("ideas at {}", config.api.ideas_url());
//! if config.identity.is_configured() {
//!     println!("identity provider: {}", config.identity.url);
//! }
//! ```

mod api;
mod error;
mod general;
mod identity;

pub use api::ApiConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use identity::IdentityConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix for every setting.
pub const ENV_PREFIX: &str = "IDEAHUB_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HubConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl HubConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`HubConfig::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Load` if a source cannot be parsed, or
    /// `ConfigError::InvalidValue` if the API section is unusable.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.api.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` to load `.env` from the current directory (or the
    /// workspace root in tests) before building the figment.
    ///
    /// # Errors
    ///
    /// Same as [`HubConfig::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".ideahub/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ideahub").join("config.toml"))
    }

    /// Walks up from `CARGO_MANIFEST_DIR` (if available) looking for `.env`,
    /// then falls back to the current directory. Missing files are ignored.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
