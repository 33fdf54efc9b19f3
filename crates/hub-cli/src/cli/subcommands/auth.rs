use clap::Subcommand;

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Create an account and its profile.
    SignUp {
        /// Full name shown on your ideas.
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign in with email and password.
    SignIn {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign in through a third-party provider in the browser.
    SignInOauth {
        /// Provider name (defaults to `identity.oauth_provider`).
        #[arg(long)]
        provider: Option<String>,
    },
    /// Sign out and forget the stored session.
    SignOut,
    /// Show the current session.
    Status,
}
