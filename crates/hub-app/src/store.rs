//! The Idea Collection Store.
//!
//! Holds the client copy of the idea list plus a loading flag and the last
//! error. Every change goes through one of the collection's four mutation
//! primitives, applied under a lock that is never held across an `.await`.
//! Remote calls happen first; local state changes only once they succeed.

use std::sync::{Mutex, MutexGuard, PoisonError};

use hub_core::{Idea, IdeaCollection, IdeaDraft, IdeaPatch, Identity};
use hub_remote::{IdeaApi, RemoteError};
use serde::Serialize;

use crate::error::StoreError;

pub const LOAD_FAILED: &str = "Failed to load ideas";
pub const CREATE_FAILED: &str = "Failed to create idea";
pub const UPDATE_FAILED: &str = "Failed to update idea";
pub const DELETE_FAILED: &str = "Failed to delete idea";

/// Prompt shown before a delete is dispatched.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this idea?";

/// Point-in-time copy of the store for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreSnapshot {
    pub ideas: Vec<Idea>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The fetched list replaced the collection.
    Applied { count: usize },
    /// A newer load or a local mutation happened while this one was in
    /// flight; its result was dropped.
    Superseded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(Idea),
    /// The confirmation step declined; nothing was sent.
    Cancelled,
}

#[derive(Default)]
struct StoreState {
    ideas: IdeaCollection,
    loading: bool,
    error: Option<String>,
    /// Bumped when a load starts.
    generation: u64,
    /// Bumped by every applied create, update or delete.
    revision: u64,
}

pub struct IdeaStore<A: IdeaApi> {
    api: A,
    state: Mutex<StoreState>,
}

/// Clears `loading` when the load that armed it is still the latest one.
struct LoadingGuard<'a> {
    state: &'a Mutex<StoreState>,
    generation: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.generation == self.generation {
            state.loading = false;
        }
    }
}

impl<A: IdeaApi> IdeaStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: Mutex::new(StoreState::default()),
        }
    }

    pub const fn api(&self) -> &A {
        &self.api
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        let state = self.lock();
        StoreSnapshot {
            ideas: state.ideas.as_slice().to_vec(),
            loading: state.loading,
            error: state.error.clone(),
        }
    }

    pub fn ideas(&self) -> Vec<Idea> {
        self.lock().ideas.as_slice().to_vec()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    /// One idea from the loaded collection, for the details view.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if no loaded idea has this id.
    pub fn get(&self, id: &str) -> Result<Idea, StoreError> {
        self.lock()
            .ideas
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(id))
    }

    /// Record a remote failure and hand back the matching error.
    fn fail(&self, message: &'static str, source: RemoteError) -> StoreError {
        tracing::warn!(error = %source, "{message}");
        self.lock().error = Some(message.to_string());
        StoreError::Remote { message, source }
    }

    /// Replace the collection with a fresh fetch.
    ///
    /// On failure the previous collection stays and the store error is set.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Remote` if the fetch fails and this load is
    /// still current.
    pub async fn load(&self) -> Result<LoadOutcome, StoreError> {
        let (generation, revision) = {
            let mut state = self.lock();
            state.generation += 1;
            state.loading = true;
            (state.generation, state.revision)
        };
        let _loading = LoadingGuard {
            state: &self.state,
            generation,
        };

        let result = self.api.list().await;

        let mut state = self.lock();
        if state.generation != generation || state.revision != revision {
            tracing::debug!(generation, "discarding superseded idea load");
            return Ok(LoadOutcome::Superseded);
        }
        match result {
            Ok(ideas) => {
                state
                    .ideas
                    .replace_all(ideas.into_iter().map(Idea::with_default_author).collect());
                state.error = None;
                let count = state.ideas.len();
                tracing::debug!(count, "ideas loaded");
                Ok(LoadOutcome::Applied { count })
            }
            Err(source) => {
                drop(state);
                Err(self.fail(LOAD_FAILED, source))
            }
        }
    }

    /// Validate, send, and append the server's record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Core` if the draft is invalid (nothing is sent),
    /// or `StoreError::Remote` if the server rejects it.
    pub async fn create(&self, draft: IdeaDraft, author: &Identity) -> Result<Idea, StoreError> {
        let idea = draft.into_idea(author)?;
        let created = match self.api.create(&idea).await {
            Ok(created) => created.with_default_author(),
            Err(source) => return Err(self.fail(CREATE_FAILED, source)),
        };

        let mut state = self.lock();
        if !state.ideas.append(created.clone()) {
            tracing::debug!(idea_id = ?created.id, "created idea already present; replaced");
        }
        state.revision += 1;
        state.error = None;
        Ok(created)
    }

    /// Send a partial update for a loaded idea and replace it locally.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Core` if the patch is invalid or the idea is not
    /// loaded, or `StoreError::Remote` if the server rejects it.
    pub async fn update(&self, id: &str, patch: IdeaPatch) -> Result<Idea, StoreError> {
        patch.validate()?;
        let previous = self.get(id)?;

        let mut updated = match self.api.update(id, &patch).await {
            Ok(updated) => updated,
            Err(source) => return Err(self.fail(UPDATE_FAILED, source)),
        };
        // Identifiers never change; the author survives a sparse response.
        updated.id = Some(id.to_string());
        if updated.user_name.is_none() {
            updated.user_name = previous.user_name;
        }
        let updated = updated.with_default_author();

        let mut state = self.lock();
        if state.ideas.replace(updated.clone()) {
            state.revision += 1;
        }
        state.error = None;
        Ok(updated)
    }

    /// Ask `confirm`, then delete remotely, then locally.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Core` if the idea is not loaded, or
    /// `StoreError::Remote` if the server refuses; the idea then stays.
    pub async fn delete<F>(&self, id: &str, confirm: F) -> Result<DeleteOutcome, StoreError>
    where
        F: FnOnce(&Idea) -> bool + Send,
    {
        let target = self.get(id)?;
        if !confirm(&target) {
            return Ok(DeleteOutcome::Cancelled);
        }

        if let Err(source) = self.api.delete(id).await {
            return Err(self.fail(DELETE_FAILED, source));
        }

        let mut state = self.lock();
        let removed = state.ideas.remove(id);
        if removed.is_some() {
            state.revision += 1;
        }
        state.error = None;
        Ok(DeleteOutcome::Deleted(removed.unwrap_or(target)))
    }
}
