mod create;
mod delete;
mod edit;
mod list;
mod show;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::IdeaCommands;
use crate::context::HubContext;

/// Handle `ideahub ideas`.
pub async fn handle(action: &IdeaCommands, ctx: &HubContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        IdeaCommands::List { category, search } => {
            list::run(category.as_deref(), search.as_deref(), ctx, flags).await
        }
        IdeaCommands::Show { id } => show::run(id, ctx, flags).await,
        IdeaCommands::Create {
            title,
            description,
            category,
        } => create::run(title, description, category.as_deref(), ctx, flags).await,
        IdeaCommands::Edit {
            id,
            title,
            description,
            category,
        } => {
            edit::run(
                id,
                title.as_deref(),
                description.as_deref(),
                category.as_deref(),
                ctx,
                flags,
            )
            .await
        }
        IdeaCommands::Delete { id, yes } => delete::run(id, *yes, ctx, flags).await,
    }
}
