//! Dashboard presentation state: the filter inputs plus everything derived
//! from them. Derivations are recomputed from the store on every call.

use hub_core::avatar::Avatar;
use hub_core::{Category, CategoryIcon, FilterCriteria, Idea};
use serde::Serialize;

/// One category filter control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryPill {
    pub category: Category,
    pub icon: CategoryIcon,
    pub selected: bool,
}

/// A rendered idea row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdeaCard {
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    /// `None` for categories outside the known set.
    pub icon: Option<CategoryIcon>,
    pub author: String,
    pub avatar: Avatar,
}

impl From<&Idea> for IdeaCard {
    fn from(idea: &Idea) -> Self {
        Self {
            id: idea.id.clone(),
            title: idea.title.clone(),
            description: idea.description.clone(),
            category: idea.category.clone(),
            icon: idea.known_category().map(Category::icon),
            author: idea.author().to_string(),
            avatar: Avatar::for_name(idea.author()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardView {
    criteria: FilterCriteria,
}

impl DashboardView {
    pub fn new(default_category: Category) -> Self {
        Self {
            criteria: FilterCriteria::new(String::new(), default_category),
        }
    }

    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.criteria.search = search.into();
    }

    pub const fn select_category(&mut self, category: Category) {
        self.criteria.category = category;
    }

    /// Ideas passing the current criteria, in source order.
    pub fn visible(&self, ideas: &[Idea]) -> Vec<Idea> {
        self.criteria.apply(ideas)
    }

    pub fn cards(&self, ideas: &[Idea]) -> Vec<IdeaCard> {
        ideas
            .iter()
            .filter(|idea| self.criteria.matches(idea))
            .map(IdeaCard::from)
            .collect()
    }

    pub fn pills(&self) -> Vec<CategoryPill> {
        Category::ORDERED
            .into_iter()
            .map(|category| CategoryPill {
                category,
                icon: category.icon(),
                selected: category == self.criteria.category,
            })
            .collect()
    }
}
