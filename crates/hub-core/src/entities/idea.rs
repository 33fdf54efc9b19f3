use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Category;
use crate::errors::CoreError;
use crate::identity::{ANONYMOUS, Identity};

/// A single shareable idea post.
///
/// `id` is absent until the remote store assigns one and never changes after.
/// `category` is kept as the raw string the server returned: unknown values
/// are preserved, they just never match a category pill.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Idea {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

impl Idea {
    /// Fill a missing or blank `user_name` with `Anonymous`.
    #[must_use]
    pub fn with_default_author(mut self) -> Self {
        if self.user_name.as_deref().is_none_or(|n| n.trim().is_empty()) {
            self.user_name = Some(ANONYMOUS.to_string());
        }
        self
    }

    #[must_use]
    pub fn author(&self) -> &str {
        self.user_name.as_deref().unwrap_or(ANONYMOUS)
    }

    #[must_use]
    pub fn known_category(&self) -> Option<Category> {
        self.category.as_deref().and_then(Category::known)
    }
}

/// Form data for creating an idea.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct IdeaDraft {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub category: Option<Category>,
}

impl IdeaDraft {
    /// Reject drafts the remote store should never see.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the title or description is blank,
    /// or the category is the `All` filter sentinel.
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("title", &self.title)?;
        require_text("description", &self.description)?;
        require_assignable(self.category)
    }

    /// Attach the acting identity and produce the record sent to the remote store.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the draft fails [`IdeaDraft::validate`].
    pub fn into_idea(self, author: &Identity) -> Result<Idea, CoreError> {
        self.validate()?;
        Ok(Idea {
            id: None,
            user_id: author.id.clone(),
            title: self.title,
            description: self.description,
            category: self.category.map(|c| c.as_str().to_string()),
            user_name: Some(author.author_name()),
        })
    }
}

/// Partial update for an existing idea. `None` fields are left untouched
/// and omitted from the request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct IdeaPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl IdeaPatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.category.is_none()
    }

    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the patch is empty, sets a blank
    /// title or description, or sets the `All` sentinel as category.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.is_empty() {
            return Err(CoreError::Validation("nothing to update".into()));
        }
        if let Some(title) = &self.title {
            require_text("title", title)?;
        }
        if let Some(description) = &self.description {
            require_text("description", description)?;
        }
        require_assignable(self.category)
    }
}

impl From<IdeaDraft> for IdeaPatch {
    /// The edit form submits every field.
    fn from(draft: IdeaDraft) -> Self {
        Self {
            title: Some(draft.title),
            description: Some(draft.description),
            category: draft.category,
        }
    }
}

fn require_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(())
}

fn require_assignable(category: Option<Category>) -> Result<(), CoreError> {
    match category {
        Some(Category::All) => Err(CoreError::Validation(
            "'All' is a filter, not an idea category".into(),
        )),
        _ => Ok(()),
    }
}
