//! Entity structs for IdeaHub domain objects.
//!
//! Field names follow the remote JSON wire format. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema`.

mod idea;
mod profile;
mod stats;

pub use idea::{Idea, IdeaDraft, IdeaPatch};
pub use profile::UserProfile;
pub use stats::Stats;
