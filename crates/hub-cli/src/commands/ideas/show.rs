use hub_app::IdeaCard;

use crate::cli::GlobalFlags;
use crate::context::HubContext;
use crate::output::output;

pub async fn run(id: &str, ctx: &HubContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let store = ctx.store();
    store.load().await?;
    let idea = store.get(id)?;
    output(&IdeaCard::from(&idea), flags.format)
}
