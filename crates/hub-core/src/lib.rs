//! # hub-core
//!
//! Core types and pure client logic for IdeaHub.
//!
//! This crate provides the foundational types shared across all IdeaHub crates:
//! - Entity structs for ideas, user profiles, identities and aggregate stats
//! - The fixed category enumeration and its icon lookup table
//! - The in-memory idea collection and its four mutation primitives
//! - Search/category filtering over a collection
//! - The navigation guard state machine and the routing table
//! - Avatar initials/colour derivation for author display
//! - Cross-cutting error types

pub mod avatar;
pub mod collection;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod filter;
pub mod guard;
pub mod identity;
pub mod routes;
pub mod session;

pub use collection::IdeaCollection;
pub use entities::{Idea, IdeaDraft, IdeaPatch, Stats, UserProfile};
pub use enums::{Category, CategoryIcon};
pub use errors::CoreError;
pub use filter::FilterCriteria;
pub use guard::{GuardDecision, GuardState, NavigationGuard};
pub use identity::{ANONYMOUS, DEFAULT_PROFILE_NAME, Identity, UserMetadata};
pub use routes::Route;
pub use session::Session;
