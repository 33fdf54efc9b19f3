//! Landing page data: aggregate counts and one featured idea.

use hub_core::{Idea, Stats};
use hub_remote::{IdeaApi, StatsApi};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingData {
    pub stats: Stats,
    pub featured: Option<Idea>,
}

/// Fetch stats (zeros on failure) and pick a featured idea uniformly at
/// random. No featured idea when the list is empty or cannot be loaded.
pub async fn load_landing<A, R>(api: &A, rng: &mut R) -> LandingData
where
    A: IdeaApi + StatsApi,
    R: Rng + ?Sized,
{
    let (stats, ideas) = tokio::join!(api.stats_or_default(), api.list());
    let ideas = ideas.unwrap_or_else(|error| {
        tracing::warn!(%error, "idea fetch for landing failed; no featured idea");
        Vec::new()
    });
    LandingData {
        stats,
        featured: ideas.choose(rng).cloned().map(Idea::with_default_author),
    }
}
