//! General application configuration.

use hub_core::Category;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Category pill selected when the dashboard opens.
    #[serde(default)]
    pub default_category: Category,
}
