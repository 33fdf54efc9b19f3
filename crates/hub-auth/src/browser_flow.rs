//! The browser leg of third-party sign-in (authorization code + PKCE).
//!
//! 1. Start `tiny_http` on the configured callback address (random port by default)
//! 2. Open the browser at the provider's authorize endpoint, redirecting back
//!    to `/auth/callback` on that server
//! 3. Wait for the redirect (in `spawn_blocking`, `tiny_http::recv` blocks)
//! 4. Hand the authorization code and PKCE verifier back for exchange

use base64::Engine as _;
use hub_config::IdentityConfig;
use hub_core::Route;
use sha2::{Digest, Sha256};

use crate::error::AuthError;

/// PKCE verifier and its S256 challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pkce {
    pub verifier: String,
    pub challenge: String,
}

impl Pkce {
    /// Fresh verifier from 32 random bytes (43 URL-safe characters).
    ///
    /// # Errors
    ///
    /// Returns `AuthError::BrowserFlowFailed` if the OS random source fails.
    pub fn generate() -> Result<Self, AuthError> {
        let mut bytes = [0u8; 32];
        getrandom::fill(&mut bytes)
            .map_err(|e| AuthError::BrowserFlowFailed(format!("failed to generate verifier: {e}")))?;
        let verifier = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes);
        Ok(Self::from_verifier(verifier))
    }

    #[must_use]
    pub fn from_verifier(verifier: String) -> Self {
        let digest = Sha256::digest(verifier.as_bytes());
        let challenge = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(digest);
        Self {
            verifier,
            challenge,
        }
    }
}

/// What the browser leg produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationCode {
    pub code: String,
    pub verifier: String,
}

/// Query parameters the provider appends to the callback redirect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
}

/// Run the browser leg. `Ok(None)` when the user cancels or the provider
/// denies access.
///
/// # Errors
///
/// Returns `AuthError::BrowserFlowFailed` if the server cannot bind or the
/// callback times out.
pub async fn authorize(
    config: &IdentityConfig,
    provider: &str,
) -> Result<Option<AuthorizationCode>, AuthError> {
    let server = tiny_http::Server::http(config.callback_addr.as_str())
        .map_err(|e| AuthError::BrowserFlowFailed(format!("failed to bind: {e}")))?;
    let addr = server
        .server_addr()
        .to_ip()
        .ok_or_else(|| AuthError::BrowserFlowFailed("no port".into()))?;

    let pkce = Pkce::generate()?;
    let redirect_to = format!("http://{addr}{}", Route::AuthCallback.path());
    let url = authorize_url(config.base(), provider, &redirect_to, &pkce.challenge);

    eprintln!("Opening browser to: {url}");
    if let Err(error) = open::that(&url) {
        eprintln!("Failed to open browser: {error}");
        eprintln!("Open the URL above manually, then return here.");
    }

    let timeout = config.callback_timeout();
    let code = tokio::task::spawn_blocking(move || wait_for_callback(&server, timeout))
        .await
        .map_err(|e| AuthError::BrowserFlowFailed(format!("spawn_blocking join: {e}")))??;

    Ok(code.map(|code| AuthorizationCode {
        code,
        verifier: pkce.verifier,
    }))
}

/// The provider's authorize endpoint for `provider`, redirecting to `redirect_to`.
#[must_use]
pub fn authorize_url(base: &str, provider: &str, redirect_to: &str, challenge: &str) -> String {
    format!(
        "{base}/auth/v1/authorize?provider={provider}&redirect_to={redirect}\
         &code_challenge={challenge}&code_challenge_method=s256",
        provider = urlencoding::encode(provider),
        redirect = urlencoding::encode(redirect_to),
    )
}

/// Parse the callback query string. Prefers `error_description` over `error`.
///
/// # Errors
///
/// Returns `AuthError::BrowserFlowFailed` on malformed percent-encoding.
pub fn parse_callback_query(query: &str) -> Result<CallbackParams, AuthError> {
    let mut params = CallbackParams::default();
    let mut description = None;
    for pair in query.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        let value = urlencoding::decode(&value.replace('+', " "))
            .map_err(|e| AuthError::BrowserFlowFailed(format!("URL decode: {e}")))?
            .into_owned();
        match key {
            "code" => params.code = Some(value),
            "error" => params.error = Some(value),
            "error_description" => description = Some(value),
            _ => {}
        }
    }
    if description.is_some() {
        params.error = description;
    }
    Ok(params)
}

/// Block until the callback server receives the provider's redirect.
///
/// Loops on `recv_timeout()`, ignoring requests that aren't the callback
/// (favicon, preflight, user refreshes) and intermediate redirects that
/// carry neither a code nor an error.
fn wait_for_callback(
    server: &tiny_http::Server,
    timeout: std::time::Duration,
) -> Result<Option<String>, AuthError> {
    let deadline = std::time::Instant::now() + timeout;
    let timed_out = || {
        AuthError::BrowserFlowFailed(format!(
            "browser callback timed out after {}s",
            timeout.as_secs()
        ))
    };

    loop {
        let remaining = deadline.saturating_duration_since(std::time::Instant::now());
        if remaining.is_zero() {
            return Err(timed_out());
        }

        let request = match server.recv_timeout(remaining) {
            Ok(Some(req)) => req,
            Ok(None) => return Err(timed_out()),
            Err(e) => return Err(AuthError::BrowserFlowFailed(format!("recv error: {e}"))),
        };

        let url = request.url().to_string();
        let (path, query) = url.split_once('?').unwrap_or((url.as_str(), ""));
        if path != Route::AuthCallback.path() {
            let _ = request.respond(tiny_http::Response::from_string("").with_status_code(204));
            continue;
        }

        let params = match parse_callback_query(query) {
            Ok(params) => params,
            Err(error) => {
                let _ = request.respond(html_page("Sign-in failed", "Check the terminal output."));
                return Err(error);
            }
        };

        if let Some(code) = params.code {
            let _ = request.respond(html_page("Signed in!", "You can close this tab."));
            return Ok(Some(code));
        }
        if let Some(reason) = params.error {
            tracing::info!(%reason, "third-party sign-in was not completed");
            let _ = request.respond(html_page("Sign-in cancelled", "You can close this tab."));
            return Ok(None);
        }

        let _ = request.respond(html_page("Waiting for sign-in…", "Redirecting, please wait."));
    }
}

fn html_page(title: &str, body: &str) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let response = tiny_http::Response::from_string(format!(
        "<html><body><h1>{title}</h1><p>{body}</p></body></html>"
    ));
    match tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"text/html; charset=utf-8"[..]) {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}
