//! Aggregate stats endpoint.

use hub_core::Stats;

use crate::http::read_envelope;
use crate::{ApiClient, RemoteError, StatsApi};

impl ApiClient {
    /// Fetch aggregate counts.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] on transport, status, or parse failure.
    pub async fn fetch_stats(&self) -> Result<Stats, RemoteError> {
        let url = format!("{}/stats", self.base_url);
        let resp = self.http.get(&url).send().await?;
        let stats: Option<Stats> = read_envelope(resp).await?;
        Ok(stats.unwrap_or_default())
    }
}

impl StatsApi for ApiClient {
    async fn stats(&self) -> Result<Stats, RemoteError> {
        self.fetch_stats().await
    }
}
