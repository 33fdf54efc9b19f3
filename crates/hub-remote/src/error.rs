//! Remote API error types.

use thiserror::Error;

/// Errors that can occur when talking to the idea/stats API.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// HTTP transport error (connect, timeout, body decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// A created or updated record came back without an identifier.
    #[error("server returned an idea without an id")]
    MissingId,
}
