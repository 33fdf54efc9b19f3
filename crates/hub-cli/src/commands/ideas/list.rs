use hub_app::{DashboardView, IdeaCard};
use hub_core::Category;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_category;
use crate::context::HubContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct IdeaListResponse {
    ideas: Vec<IdeaCard>,
}

pub async fn run(
    category: Option<&str>,
    search: Option<&str>,
    ctx: &HubContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let view = build_view(ctx.config.general.default_category, category, search)?;

    let store = ctx.store();
    store.load().await?;
    tracing::debug!(criteria = ?view.criteria(), total = store.ideas().len(), "listing ideas");

    output(
        &IdeaListResponse {
            ideas: view.cards(&store.ideas()),
        },
        flags.format,
    )
}

fn build_view(
    default_category: Category,
    category: Option<&str>,
    search: Option<&str>,
) -> anyhow::Result<DashboardView> {
    let mut view = DashboardView::new(default_category);
    if let Some(raw) = category {
        view.select_category(parse_category(raw)?);
    }
    if let Some(search) = search {
        view.set_search(search);
    }
    Ok(view)
}
