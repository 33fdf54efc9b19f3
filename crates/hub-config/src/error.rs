//! Errors raised while loading or checking the IdeaHub configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A layer (TOML file or `IDEAHUB_*` variable) could not be read or
    /// did not fit the expected shape.
    #[error("could not load ideahub config: {0}")]
    Load(#[from] figment::Error),

    /// A section the command needs has empty required keys.
    #[error(
        "[{section}] is not set up, missing {}; set IDEAHUB_{}__<KEY> or add them to .ideahub/config.toml",
        missing.join(", "),
        section.to_ascii_uppercase()
    )]
    Unconfigured {
        section: &'static str,
        missing: Vec<&'static str>,
    },

    #[error("bad value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::ConfigError;

    #[test]
    fn unconfigured_names_missing_keys_and_env_prefix() {
        let error = ConfigError::Unconfigured {
            section: "identity",
            missing: vec!["url", "anon_key"],
        };
        assert_eq!(
            error.to_string(),
            "[identity] is not set up, missing url, anon_key; \
             set IDEAHUB_IDENTITY__<KEY> or add them to .ideahub/config.toml"
        );
    }

    #[test]
    fn invalid_value_names_dotted_key() {
        let error = ConfigError::InvalidValue {
            key: "api.timeout_secs",
            reason: "must be greater than zero".into(),
        };
        assert_eq!(error.to_string(), "bad value for api.timeout_secs: must be greater than zero");
    }
}
