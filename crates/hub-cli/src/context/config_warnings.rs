use hub_config::HubConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &HubConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &HubConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let mut warnings = Vec::new();

    if !config.identity.is_configured() && has_single_underscore_key(&env_keys, "IDEAHUB_IDENTITY") {
        warnings.push(
            "Identity config appears default while IDEAHUB_IDENTITY* env vars exist. Use double underscores (example: IDEAHUB_IDENTITY__ANON_KEY)."
                .to_string(),
        );
    }

    if has_single_underscore_key(&env_keys, "IDEAHUB_API") {
        warnings.push(
            "IDEAHUB_API* env vars without a double underscore are ignored (example: IDEAHUB_API__BASE_URL)."
                .to_string(),
        );
    }

    warnings
}

/// `IDEAHUB_IDENTITY_URL` instead of `IDEAHUB_IDENTITY__URL`.
fn has_single_underscore_key(keys: &[String], prefix: &str) -> bool {
    keys.iter()
        .filter_map(|key| key.strip_prefix(prefix))
        .any(|rest| !rest.starts_with("__"))
}

#[cfg(test)]
mod tests {
    use hub_config::{HubConfig, IdentityConfig};
    use pretty_assertions::assert_eq;

    use super::collect_unconfigured_warnings;

    fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn warns_for_single_underscore_keys() {
        let warnings = collect_unconfigured_warnings(
            &HubConfig::default(),
            env(&[
                ("IDEAHUB_IDENTITY_URL", "https://demo.supabase.co"),
                ("IDEAHUB_API_BASE_URL", "http://localhost:9000"),
            ]),
        );
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("IDEAHUB_IDENTITY__ANON_KEY"));
    }

    #[test]
    fn quiet_for_well_formed_keys() {
        let warnings = collect_unconfigured_warnings(
            &HubConfig::default(),
            env(&[
                ("IDEAHUB_IDENTITY__URL", "https://demo.supabase.co"),
                ("IDEAHUB_API__BASE_URL", "http://localhost:9000"),
                ("IDEAHUB_LOG", "debug"),
            ]),
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn quiet_when_identity_is_configured() {
        let config = HubConfig {
            identity: IdentityConfig {
                url: "https://demo.supabase.co".to_string(),
                anon_key: "anon".to_string(),
                ..IdentityConfig::default()
            },
            ..HubConfig::default()
        };
        let warnings =
            collect_unconfigured_warnings(&config, env(&[("IDEAHUB_IDENTITY_URL", "https://x")]));
        assert!(warnings.is_empty());
    }
}
