use hub_core::Stats;
use hub_remote::StatsApi;

use crate::cli::GlobalFlags;
use crate::context::HubContext;
use crate::output::output;

/// Handle `ideahub stats`. An unreachable or failing stats endpoint prints
/// zero counts, the same as the landing page.
pub async fn handle(ctx: &HubContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&fetch(&ctx.api).await, flags.format)
}

async fn fetch<A: StatsApi>(api: &A) -> Stats {
    api.stats_or_default().await
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use hub_core::Stats;
    use hub_remote::ApiClient;
    use pretty_assertions::assert_eq;

    use super::fetch;

    #[tokio::test]
    async fn unreachable_endpoint_reports_zero_counts() {
        // Nothing listens on the discard port.
        let api = ApiClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();

        let stats = fetch(&api).await;

        assert_eq!(stats, Stats::default());
        assert_eq!((stats.total_users, stats.total_ideas), (0, 0));
    }
}
