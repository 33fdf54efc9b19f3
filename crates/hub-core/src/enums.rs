//! The fixed category enumeration shared by filters and forms.
//!
//! `All` is the universal filter sentinel. Every other variant is a real
//! category an idea can carry. Icons are resolved through a lookup table
//! rather than stored alongside the data.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Idea category, serialized with the display name the remote API stores.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum Category {
    #[default]
    All,
    Programming,
    Design,
    Photography,
}

impl Category {
    /// Every entry in presentation order, sentinel first.
    pub const ORDERED: [Self; 4] = [Self::All, Self::Programming, Self::Design, Self::Photography];

    /// The selectable categories for a new or edited idea (sentinel excluded).
    #[must_use]
    pub fn assignable() -> &'static [Self] {
        &Self::ORDERED[1..]
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Programming => "Programming",
            Self::Design => "Design",
            Self::Photography => "Photography",
        }
    }

    #[must_use]
    pub const fn icon(self) -> CategoryIcon {
        match self {
            Self::All => CategoryIcon::BookOpen,
            Self::Programming => CategoryIcon::Code,
            Self::Design => CategoryIcon::Palette,
            Self::Photography => CategoryIcon::Camera,
        }
    }

    #[must_use]
    pub const fn is_all(self) -> bool {
        matches!(self, Self::All)
    }

    /// Exact-match test against an idea's raw category field.
    ///
    /// `All` matches everything, including ideas without a category. A named
    /// category only matches its own display name; unknown strings never match.
    #[must_use]
    pub fn matches(self, category: Option<&str>) -> bool {
        self.is_all() || category == Some(self.as_str())
    }

    /// Resolve a raw category string to a known category, if it is one.
    #[must_use]
    pub fn known(raw: &str) -> Option<Self> {
        Self::ORDERED.into_iter().find(|c| c.as_str() == raw)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    /// Case-insensitive parse, for user-typed input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ORDERED
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "unknown category '{trimmed}' (expected one of: {})",
                    Self::ORDERED.map(Self::as_str).join(", ")
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// CategoryIcon
// ---------------------------------------------------------------------------

/// Display icon for a category pill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryIcon {
    BookOpen,
    Code,
    Palette,
    Camera,
}

impl CategoryIcon {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BookOpen => "book-open",
            Self::Code => "code",
            Self::Palette => "palette",
            Self::Camera => "camera",
        }
    }
}

impl fmt::Display for CategoryIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
