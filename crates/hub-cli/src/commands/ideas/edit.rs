use hub_app::IdeaCard;
use hub_core::IdeaPatch;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_assignable;
use crate::context::HubContext;
use crate::output::output;

pub async fn run(
    id: &str,
    title: Option<&str>,
    description: Option<&str>,
    category: Option<&str>,
    ctx: &HubContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let patch = IdeaPatch {
        title: title.map(str::to_string),
        description: description.map(str::to_string),
        category: parse_assignable(category)?,
    };
    patch.validate()?;

    let app = ctx.app()?;
    let result = async {
        app.require_user().await?;
        app.load_ideas().await?;
        app.update_idea(id, patch).await
    }
    .await;
    app.shutdown();

    output(&IdeaCard::from(&result?), flags.format)
}
