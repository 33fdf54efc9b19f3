//! [`IdentityProvider`] backed by a Supabase-compatible hosted project.
//!
//! Talks to the GoTrue endpoints under `/auth/v1` and the profile table under
//! `/rest/v1`. Every request carries the project's anon key in `apikey`;
//! authenticated requests add the session's bearer token.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use hub_config::IdentityConfig;
use hub_core::{Identity, UserMetadata, UserProfile};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::broadcast;

use crate::browser_flow;
use crate::error::AuthError;
use crate::provider::{
    AuthEvent, AuthEventKind, AuthSession, EVENT_CHANNEL_CAPACITY, IdentityProvider,
};
use crate::refresh;
use crate::token_store::SessionStore;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Token endpoint response body.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: Identity,
}

impl TokenResponse {
    fn into_session(self, now: i64) -> AuthSession {
        AuthSession {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: self.expires_at.or_else(|| self.expires_in.map(|s| now + s)),
            user: self.user,
        }
    }
}

pub struct SupabaseProvider {
    http: reqwest::Client,
    config: IdentityConfig,
    store: SessionStore,
    current: Mutex<Option<AuthSession>>,
    events: broadcast::Sender<AuthEvent>,
}

impl SupabaseProvider {
    /// # Errors
    ///
    /// Returns `AuthError::NotConfigured` if the project URL or anon key is
    /// missing, or `AuthError::Http` if the HTTP client cannot be built.
    pub fn new(config: IdentityConfig, store: SessionStore) -> Result<Self, AuthError> {
        config
            .require()
            .map_err(|e| AuthError::NotConfigured(e.to_string()))?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("ideahub/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Ok(Self {
            http,
            config,
            store,
            current: Mutex::new(None),
            events,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &IdentityConfig {
        &self.config
    }

    #[must_use]
    pub const fn store(&self) -> &SessionStore {
        &self.store
    }

    fn lock(&self) -> MutexGuard<'_, Option<AuthSession>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn snapshot(&self) -> Option<AuthSession> {
        self.lock().clone()
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.config.base())
    }

    fn rest_url(&self) -> String {
        format!("{}/rest/v1/{}", self.config.base(), self.config.profiles_table)
    }

    /// Request with the anon key, authorized as `token` (or as the anon role).
    fn request(&self, method: Method, url: &str, token: Option<&str>) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(token.unwrap_or(&self.config.anon_key))
    }

    fn emit(&self, kind: AuthEventKind, session: Option<AuthSession>) {
        // No subscribers is fine.
        let _ = self.events.send(AuthEvent::new(kind, session));
    }

    /// Make `session` current, persist it, and announce it.
    fn install(&self, session: AuthSession, kind: AuthEventKind) -> AuthSession {
        if let Err(error) = self.store.save(&session) {
            tracing::warn!(%error, "failed to persist session; it will not survive this process");
        }
        *self.lock() = Some(session.clone());
        tracing::debug!(user_id = %session.user.id, kind = kind.as_str(), "session installed");
        self.emit(kind, Some(session.clone()));
        session
    }

    fn clear(&self) {
        *self.lock() = None;
        if let Err(error) = self.store.delete() {
            tracing::warn!(%error, "failed to remove persisted session");
        }
        self.emit(AuthEventKind::SignedOut, None);
    }

    async fn grant(&self, grant_type: &str, body: serde_json::Value) -> Result<AuthSession, AuthError> {
        let url = format!("{}?grant_type={grant_type}", self.auth_url("token"));
        let response = self
            .request(Method::POST, &url, None)
            .json(&body)
            .send()
            .await?;
        let token: TokenResponse = check(response).await?.json().await?;
        Ok(token.into_session(chrono::Utc::now().timestamp()))
    }
}

impl IdentityProvider for SupabaseProvider {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: &UserMetadata,
    ) -> Result<Identity, AuthError> {
        let mut url = self.auth_url("signup");
        if !self.config.email_redirect_url.is_empty() {
            url.push_str("?redirect_to=");
            url.push_str(&urlencoding::encode(&self.config.email_redirect_url));
        }
        let response = self
            .request(Method::POST, &url, None)
            .json(&json!({ "email": email, "password": password, "data": metadata }))
            .send()
            .await?;
        let value: serde_json::Value = check(response).await?.json().await?;

        // With email confirmation disabled the provider returns a full session;
        // otherwise just the pending user.
        if value.get("access_token").is_some() {
            let token: TokenResponse = serde_json::from_value(value)
                .map_err(|e| AuthError::Other(format!("unexpected sign-up response: {e}")))?;
            let session = self.install(
                token.into_session(chrono::Utc::now().timestamp()),
                AuthEventKind::SignedIn,
            );
            return Ok(session.user);
        }
        let user = value
            .get("user")
            .filter(|v| !v.is_null())
            .cloned()
            .unwrap_or(value);
        serde_json::from_value(user)
            .map_err(|e| AuthError::Other(format!("unexpected sign-up response: {e}")))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let session = self
            .grant("password", json!({ "email": email, "password": password }))
            .await
            .map_err(|error| match error {
                AuthError::Provider {
                    status: 400 | 401 | 422,
                    message,
                } => AuthError::InvalidCredentials(message),
                other => other,
            })?;
        Ok(self.install(session, AuthEventKind::SignedIn))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let Some(session) = self.snapshot().or_else(|| self.store.load()) else {
            self.clear();
            return Ok(());
        };
        let url = format!("{}?scope=global", self.auth_url("logout"));
        let response = self
            .request(Method::POST, &url, Some(&session.access_token))
            .send()
            .await?;
        // An already-revoked session is as good as signed out.
        if !matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND
        ) {
            check(response).await?;
        }
        self.clear();
        Ok(())
    }

    async fn current_session(&self) -> Result<Option<AuthSession>, AuthError> {
        let session = match self.snapshot() {
            Some(session) => session,
            None => {
                let Some(stored) = self.store.load() else {
                    return Ok(None);
                };
                *self.lock() = Some(stored.clone());
                stored
            }
        };
        if !refresh::needs_refresh(&session, chrono::Utc::now()) {
            return Ok(Some(session));
        }

        tracing::debug!(user_id = %session.user.id, "session near expiry; refreshing");
        match self
            .grant("refresh_token", json!({ "refresh_token": session.refresh_token }))
            .await
        {
            Ok(fresh) => Ok(Some(self.install(fresh, AuthEventKind::TokenRefreshed))),
            Err(AuthError::Provider { status, message }) => {
                tracing::warn!(status, %message, "session refresh rejected; signing out");
                self.clear();
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }

    async fn sign_in_with_oauth(&self, provider: &str) -> Result<Option<AuthSession>, AuthError> {
        let Some(code) = browser_flow::authorize(&self.config, provider).await? else {
            return Ok(None);
        };
        let session = self
            .grant(
                "pkce",
                json!({ "auth_code": code.code, "code_verifier": code.verifier }),
            )
            .await?;
        Ok(Some(self.install(session, AuthEventKind::SignedIn)))
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }

    async fn fetch_profile(&self, user_id: &str) -> Result<Option<UserProfile>, AuthError> {
        let token = self.snapshot().map(|s| s.access_token);
        let url = format!(
            "{}?id=eq.{}&select=id,full_name,email",
            self.rest_url(),
            urlencoding::encode(user_id)
        );
        let response = self
            .request(Method::GET, &url, token.as_deref())
            .send()
            .await?;
        let rows: Vec<UserProfile> = check(response).await?.json().await?;
        Ok(rows.into_iter().next())
    }

    async fn insert_profile(&self, profile: &UserProfile) -> Result<(), AuthError> {
        let token = self.snapshot().map(|s| s.access_token);
        let response = self
            .request(Method::POST, &self.rest_url(), token.as_deref())
            .header("Prefer", "return=minimal")
            .json(&[profile])
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

/// Pass successful responses through; turn failures into `AuthError::Provider`.
async fn check(response: reqwest::Response) -> Result<reqwest::Response, AuthError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(AuthError::Provider {
        status: status.as_u16(),
        message: error_message(&body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string()),
    })
}

/// Human-readable message from a provider error body. The auth and REST
/// endpoints use different field names.
pub(crate) fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["msg", "error_description", "message", "error"]
        .into_iter()
        .find_map(|field| value.get(field)?.as_str())
        .filter(|s| !s.is_empty())
        .map(String::from)
}
