mod auth;
mod ideas;

pub use auth::AuthCommands;
pub use ideas::IdeaCommands;
