//! # hub-remote
//!
//! HTTP clients for the IdeaHub REST API.
//!
//! - Ideas: `GET /ideas`, `POST /ideas/create`, `PUT /ideas/{id}`,
//!   `DELETE /ideas/{id}`, each answering `{ "data": ... }`
//! - Stats: `GET /stats` answering `{ "data": { totalUsers, totalIdeas } }`
//!
//! The clients hold no local state. The [`IdeaApi`] and [`StatsApi`] traits
//! are the seams the application layer is written against.

pub mod ideas;
pub mod stats;

mod error;
mod http;

pub use error::RemoteError;

use std::future::Future;
use std::time::Duration;

use hub_config::ApiConfig;
use hub_core::{Idea, IdeaPatch, Stats};

/// CRUD operations on the remote idea collection.
pub trait IdeaApi: Send + Sync {
    /// Fetch the full collection.
    fn list(&self) -> impl Future<Output = Result<Vec<Idea>, RemoteError>> + Send;

    /// Persist a new idea; the result carries the server-assigned id.
    fn create(&self, idea: &Idea) -> impl Future<Output = Result<Idea, RemoteError>> + Send;

    /// Apply a partial update and return the stored record.
    fn update(
        &self,
        id: &str,
        patch: &IdeaPatch,
    ) -> impl Future<Output = Result<Idea, RemoteError>> + Send;

    fn delete(&self, id: &str) -> impl Future<Output = Result<(), RemoteError>> + Send;
}

/// Read-only aggregate counts.
pub trait StatsApi: Send + Sync {
    fn stats(&self) -> impl Future<Output = Result<Stats, RemoteError>> + Send;

    /// Stats, substituting `{0, 0}` on any failure.
    fn stats_or_default(&self) -> impl Future<Output = Stats> + Send {
        async move {
            self.stats().await.unwrap_or_else(|error| {
                tracing::warn!(%error, "stats fetch failed; showing zero counts");
                Stats::default()
            })
        }
    }
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for the idea and stats endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` (no trailing path) with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Http`] if the underlying `reqwest::Client` fails to build.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("ideahub/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// # Errors
    ///
    /// Returns [`RemoteError::Http`] if the underlying `reqwest::Client` fails to build.
    pub fn from_config(config: &ApiConfig) -> Result<Self, RemoteError> {
        Self::new(config.base(), Duration::from_secs(config.timeout_secs))
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn ideas_url(&self) -> String {
        format!("{}/ideas", self.base_url)
    }

    fn idea_url(&self, id: &str) -> String {
        format!("{}/ideas/{}", self.base_url, urlencoding::encode(id))
    }
}
