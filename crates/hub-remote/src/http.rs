//! Shared HTTP response helpers for the API clients.
//!
//! Centralizes the status check and the `{ "data": ... }` envelope so the
//! endpoint modules stay focused on request construction.

use serde::de::DeserializeOwned;

use crate::error::RemoteError;

/// Every API response wraps its payload in `data`.
#[derive(Debug, serde::Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
}

/// Return the response unchanged on success, or [`RemoteError::Api`] with
/// the status code and body text.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
    if !resp.status().is_success() {
        return Err(RemoteError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Check the status, then decode the envelope. `data` may be absent or null.
pub async fn read_envelope<T: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<Option<T>, RemoteError> {
    let resp = check_response(resp).await?;
    let bytes = resp.bytes().await?;
    parse_envelope(&bytes)
}

fn parse_envelope<T: DeserializeOwned>(bytes: &[u8]) -> Result<Option<T>, RemoteError> {
    serde_json::from_slice::<Envelope<T>>(bytes)
        .map(|envelope| envelope.data)
        .map_err(|e| RemoteError::Parse(e.to_string()))
}
