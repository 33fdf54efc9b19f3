//! # hub-app
//!
//! The stateful layer between the remote clients and whatever renders them.
//!
//! - [`IdeaStore`]: the client copy of the idea list, its loading flag and
//!   last error, changed only after the remote call succeeds
//! - [`DashboardView`]: search text and category selection, and the
//!   filtered cards derived from them
//! - [`load_landing`]: aggregate counts plus a featured idea
//! - [`AppState`]: the session manager, store, guard and view wired
//!   together with a start/shutdown lifecycle

pub mod landing;
pub mod state;
pub mod store;
pub mod view;

mod error;

#[cfg(test)]
mod testing;

pub use error::StoreError;
pub use landing::{LandingData, load_landing};
pub use state::{AppState, DashboardState};
pub use store::{DeleteOutcome, IdeaStore, LoadOutcome, StoreSnapshot};
pub use view::{CategoryPill, DashboardView, IdeaCard};
