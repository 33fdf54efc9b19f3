use hub_app::store::DELETE_PROMPT;
use hub_app::{DeleteOutcome, IdeaCard};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::prompt::confirm_on_terminal;
use crate::context::HubContext;
use crate::output::output;
use crate::ui;

#[derive(Debug, Serialize)]
struct DeleteResponse {
    deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    idea: Option<IdeaCard>,
}

pub async fn run(id: &str, yes: bool, ctx: &HubContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if !yes && !ui::prefs().interactive {
        anyhow::bail!("refusing to delete idea '{id}' without confirmation; pass --yes");
    }

    let app = ctx.app()?;
    let result = async {
        app.require_user().await?;
        app.load_ideas().await?;
        app.delete_idea(id, |idea| {
            yes || {
                eprintln!("{}: {}", idea.title, idea.author());
                confirm_on_terminal(DELETE_PROMPT)
            }
        })
        .await
    }
    .await;
    app.shutdown();

    let response = match result? {
        DeleteOutcome::Deleted(idea) => DeleteResponse {
            deleted: true,
            idea: Some(IdeaCard::from(&idea)),
        },
        DeleteOutcome::Cancelled => DeleteResponse {
            deleted: false,
            idea: None,
        },
    };
    output(&response, flags.format)
}
