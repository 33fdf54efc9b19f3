//! Cross-cutting error types for IdeaHub.
//!
//! Domain-specific errors (`RemoteError`, `AuthError`, `StoreError`) live in
//! their respective crates. The binary converges everything into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any IdeaHub crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation (required fields, unknown category).
    #[error("Validation error: {0}")]
    Validation(String),
}
