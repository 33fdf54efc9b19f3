//! The client-side copy of the idea list.
//!
//! Four mutations only: replace-all, append, replace-by-id, remove-by-id.
//! None of them can leave two records with the same identifier, and the
//! by-id operations are no-ops when the identifier is absent.

use std::collections::HashSet;

use crate::entities::Idea;

/// Ordered idea records with unique identifiers once assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdeaCollection {
    ideas: Vec<Idea>,
}

impl IdeaCollection {
    #[must_use]
    pub const fn new() -> Self {
        Self { ideas: Vec::new() }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Idea] {
        &self.ideas
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ideas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ideas.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Idea> {
        self.position(id).map(|idx| &self.ideas[idx])
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Replace the whole list after a full fetch.
    ///
    /// Later records carrying an identifier already seen are dropped, so the
    /// first occurrence wins and order is otherwise preserved.
    pub fn replace_all(&mut self, ideas: Vec<Idea>) {
        let mut seen = HashSet::new();
        let before = ideas.len();
        self.ideas = ideas
            .into_iter()
            .filter(|idea| idea.id.as_ref().is_none_or(|id| seen.insert(id.clone())))
            .collect();
        if self.ideas.len() != before {
            tracing::debug!(
                dropped = before - self.ideas.len(),
                "duplicate idea ids dropped from full fetch"
            );
        }
    }

    /// Append a freshly created record.
    ///
    /// If the identifier is already present the existing record is replaced
    /// in place instead. Returns `true` when a new entry was added.
    pub fn append(&mut self, idea: Idea) -> bool {
        if let Some(idx) = idea.id.as_deref().and_then(|id| self.position(id)) {
            self.ideas[idx] = idea;
            return false;
        }
        self.ideas.push(idea);
        true
    }

    /// Replace the record with the same identifier. No-op (returns `false`)
    /// when the record has no identifier or it is not in the collection.
    pub fn replace(&mut self, idea: Idea) -> bool {
        let Some(idx) = idea.id.as_deref().and_then(|id| self.position(id)) else {
            return false;
        };
        self.ideas[idx] = idea;
        true
    }

    /// Remove the record with `id`, returning it. No-op when absent.
    pub fn remove(&mut self, id: &str) -> Option<Idea> {
        self.position(id).map(|idx| self.ideas.remove(idx))
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.ideas.iter().position(|idea| idea.id.as_deref() == Some(id))
    }
}

impl From<Vec<Idea>> for IdeaCollection {
    fn from(ideas: Vec<Idea>) -> Self {
        let mut collection = Self::new();
        collection.replace_all(ideas);
        collection
    }
}
