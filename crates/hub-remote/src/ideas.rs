//! Idea collection endpoints.

use hub_core::{Idea, IdeaPatch};

use crate::http::{check_response, read_envelope};
use crate::{ApiClient, IdeaApi, RemoteError};

impl ApiClient {
    /// Fetch every idea. A response without `data` is an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if the request fails, the API returns a
    /// non-success status, or the body cannot be parsed.
    pub async fn list_ideas(&self) -> Result<Vec<Idea>, RemoteError> {
        let resp = self.http.get(self.ideas_url()).send().await?;
        let ideas: Option<Vec<Idea>> = read_envelope(resp).await?;
        let ideas = ideas.unwrap_or_default();
        tracing::debug!(count = ideas.len(), "fetched ideas");
        Ok(ideas)
    }

    /// Create an idea.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Parse`] if `data` is missing and
    /// [`RemoteError::MissingId`] if the stored record has no id.
    pub async fn create_idea(&self, idea: &Idea) -> Result<Idea, RemoteError> {
        let url = format!("{}/create", self.ideas_url());
        let resp = self.http.post(&url).json(idea).send().await?;
        let created = require_data(read_envelope(resp).await?, "create")?;
        if created.id.is_none() {
            return Err(RemoteError::MissingId);
        }
        tracing::debug!(idea_id = created.id.as_deref(), "created idea");
        Ok(created)
    }

    /// Send a partial update for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] on transport, status, or parse failure.
    pub async fn update_idea(&self, id: &str, patch: &IdeaPatch) -> Result<Idea, RemoteError> {
        let resp = self.http.put(self.idea_url(id)).json(patch).send().await?;
        let mut updated = require_data(read_envelope(resp).await?, "update")?;
        // The record addressed by the URL is the one that changed.
        if updated.id.is_none() {
            updated.id = Some(id.to_string());
        }
        Ok(updated)
    }

    /// Delete `id`. Only the status matters; any body is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Api`] for a non-success status.
    pub async fn delete_idea(&self, id: &str) -> Result<(), RemoteError> {
        let resp = self.http.delete(self.idea_url(id)).send().await?;
        check_response(resp).await?;
        tracing::debug!(idea_id = id, "deleted idea");
        Ok(())
    }
}

fn require_data(data: Option<Idea>, operation: &str) -> Result<Idea, RemoteError> {
    data.ok_or_else(|| RemoteError::Parse(format!("{operation} response has no data")))
}

impl IdeaApi for ApiClient {
    async fn list(&self) -> Result<Vec<Idea>, RemoteError> {
        self.list_ideas().await
    }

    async fn create(&self, idea: &Idea) -> Result<Idea, RemoteError> {
        self.create_idea(idea).await
    }

    async fn update(&self, id: &str, patch: &IdeaPatch) -> Result<Idea, RemoteError> {
        self.update_idea(id, patch).await
    }

    async fn delete(&self, id: &str) -> Result<(), RemoteError> {
        self.delete_idea(id).await
    }
}
