use clap::Subcommand;

use crate::cli::subcommands::{AuthCommands, IdeaCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Browse and manage ideas.
    Ideas {
        #[command(subcommand)]
        action: IdeaCommands,
    },
    /// Aggregate user and idea counts.
    Stats,
    /// Landing page data: counts plus one featured idea.
    Landing,
    /// Sign up, sign in, sign out.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Resolve a path against the routing table and navigation guard.
    Route {
        /// Path such as `/dashboard` or `/signin`.
        path: String,
    },
    /// List categories with their icons.
    Categories,
}
