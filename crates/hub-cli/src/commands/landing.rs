use hub_app::load_landing;

use crate::cli::GlobalFlags;
use crate::context::HubContext;
use crate::output::output;

pub async fn handle(ctx: &HubContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let landing = load_landing(&ctx.api, &mut rand::thread_rng()).await;
    output(&landing, flags.format)
}
