use base64::Engine as _;

use crate::error::AuthError;
use crate::provider::AuthSession;

/// Sessions expiring within this window are refreshed before use.
pub const EXPIRY_BUFFER_SECS: i64 = 60;

/// When the session's access token expires.
///
/// Prefers the `expires_at` the provider returned; falls back to the JWT
/// `exp` claim. `None` if neither is available.
#[must_use]
pub fn session_expiry(session: &AuthSession) -> Option<chrono::DateTime<chrono::Utc>> {
    session
        .expires_at
        .and_then(|ts| chrono::DateTime::from_timestamp(ts, 0))
        .or_else(|| decode_expiry(&session.access_token).ok())
}

/// Whether the session should be refreshed at `now`.
///
/// A session with unknown expiry is never refreshed proactively; the
/// provider rejects it when it actually lapses.
#[must_use]
pub fn needs_refresh(session: &AuthSession, now: chrono::DateTime<chrono::Utc>) -> bool {
    session_expiry(session)
        .is_some_and(|exp| exp - chrono::Duration::seconds(EXPIRY_BUFFER_SECS) <= now)
}

/// Decode JWT `exp` claim without signature verification (for quick expiry checks).
///
/// # Errors
///
/// Returns `AuthError::Other` if the JWT format is invalid or the `exp` claim
/// is missing or cannot be parsed.
pub fn decode_expiry(jwt: &str) -> Result<chrono::DateTime<chrono::Utc>, AuthError> {
    let parts: Vec<&str> = jwt.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::Other("invalid JWT format".into()));
    }
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|e| AuthError::Other(format!("base64 decode failed: {e}")))?;
    let value: serde_json::Value = serde_json::from_slice(&payload)
        .map_err(|e| AuthError::Other(format!("JSON parse failed: {e}")))?;
    let exp = value["exp"]
        .as_i64()
        .ok_or_else(|| AuthError::Other("missing exp claim".into()))?;
    chrono::DateTime::from_timestamp(exp, 0)
        .ok_or_else(|| AuthError::Other("invalid exp timestamp".into()))
}
