//! Search and category filtering over the idea list.
//!
//! Pure and synchronous: the same inputs always give the same output, and the
//! output keeps source order.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Idea;
use crate::enums::Category;

/// Transient view criteria. Never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FilterCriteria {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub category: Category,
}

impl FilterCriteria {
    #[must_use]
    pub fn new(search: impl Into<String>, category: Category) -> Self {
        Self {
            search: search.into(),
            category,
        }
    }

    /// Category must match exactly (unless `All`); then, if the search text is
    /// non-empty, the title or description must contain it, ignoring case.
    #[must_use]
    pub fn matches(&self, idea: &Idea) -> bool {
        if !self.category.matches(idea.category.as_deref()) {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        idea.title.to_lowercase().contains(&needle)
            || idea.description.to_lowercase().contains(&needle)
    }

    #[must_use]
    pub fn apply(&self, ideas: &[Idea]) -> Vec<Idea> {
        ideas.iter().filter(|idea| self.matches(idea)).cloned().collect()
    }
}
