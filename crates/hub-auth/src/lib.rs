//! # hub-auth
//!
//! Identity for IdeaHub.
//!
//! Provides the [`IdentityProvider`] seam and its hosted implementation
//! ([`SupabaseProvider`]), the [`SessionManager`] that owns the client's
//! session, the OAuth callback resolution, browser sign-in (`tiny_http` +
//! `open`, PKCE), and session persistence in the OS keychain (`keyring`).

pub mod browser_flow;
pub mod callback;
pub mod error;
pub mod manager;
pub mod provider;
pub mod refresh;
pub mod supabase;
pub mod token_store;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use callback::{CallbackOutcome, resolve_callback};
pub use error::AuthError;
pub use manager::SessionManager;
pub use provider::{AuthEvent, AuthEventKind, AuthOutcome, AuthSession, IdentityProvider};
pub use supabase::SupabaseProvider;
pub use token_store::SessionStore;
