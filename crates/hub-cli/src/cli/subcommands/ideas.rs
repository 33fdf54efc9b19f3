use clap::Subcommand;

/// Idea commands. Create, edit and delete need a signed-in session.
#[derive(Clone, Debug, Subcommand)]
pub enum IdeaCommands {
    /// List ideas, optionally filtered.
    List {
        /// Category name (case-insensitive); `All` shows everything.
        #[arg(long)]
        category: Option<String>,
        /// Case-insensitive title substring.
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one idea by ID.
    Show { id: String },
    /// Share a new idea.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        category: Option<String>,
    },
    /// Edit an idea. Omitted fields keep their value.
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Delete an idea.
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}
