use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Aggregate counts shown on the landing page.
///
/// `Default` is the `{0, 0}` fallback used whenever the stats call fails.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_ideas: u64,
}
