use hub_app::IdeaCard;
use hub_core::IdeaDraft;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_assignable;
use crate::context::HubContext;
use crate::output::output;

pub async fn run(
    title: &str,
    description: &str,
    category: Option<&str>,
    ctx: &HubContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let draft = IdeaDraft {
        title: title.to_string(),
        description: description.to_string(),
        category: parse_assignable(category)?,
    };
    draft.validate()?;

    let app = ctx.app()?;
    let created = app.create_idea(draft).await;
    app.shutdown();

    output(&IdeaCard::from(&created?), flags.format)
}
