//! In-memory [`IdentityProvider`] for driving the session manager and the
//! layers above it without a network.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use hub_core::{Identity, UserMetadata, UserProfile};
use tokio::sync::{Notify, broadcast};

use crate::error::AuthError;
use crate::provider::{
    AuthEvent, AuthEventKind, AuthSession, EVENT_CHANNEL_CAPACITY, IdentityProvider,
};

#[derive(Default)]
struct State {
    accounts: HashMap<String, (String, Identity)>,
    current: Option<AuthSession>,
    profiles: HashMap<String, UserProfile>,
    oauth_identity: Option<Identity>,
}

pub struct MemoryProvider {
    state: Mutex<State>,
    events: broadcast::Sender<AuthEvent>,
    fetch_gated: AtomicBool,
    fetch_gate: Notify,
    fail_profile_inserts: AtomicBool,
    fail_sign_out: AtomicBool,
}

impl Default for MemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn session_for(user: Identity) -> AuthSession {
    AuthSession {
        access_token: format!("token-{}", user.id),
        refresh_token: String::new(),
        expires_at: None,
        user,
    }
}

impl MemoryProvider {
    #[must_use]
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: Mutex::new(State::default()),
            events,
            fetch_gated: AtomicBool::new(false),
            fetch_gate: Notify::new(),
            fail_profile_inserts: AtomicBool::new(false),
            fail_sign_out: AtomicBool::new(false),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add an account that `sign_in` accepts.
    pub fn register(&self, email: &str, password: &str, user: Identity) {
        self.lock()
            .accounts
            .insert(email.to_string(), (password.to_string(), user));
    }

    /// Set the session `current_session` reports, without an event.
    pub fn set_current(&self, user: Option<Identity>) {
        self.lock().current = user.map(session_for);
    }

    /// Identity the next OAuth flow completes with; `None` simulates a cancel.
    pub fn set_oauth_identity(&self, user: Option<Identity>) {
        self.lock().oauth_identity = user;
    }

    /// Push an event as if the provider's session changed remotely.
    pub fn push(&self, kind: AuthEventKind, user: Option<Identity>) {
        let _ = self.events.send(AuthEvent::new(kind, user.map(session_for)));
    }

    /// Stall `current_session` until [`MemoryProvider::release_fetch`].
    pub fn gate_fetch(&self) {
        self.fetch_gated.store(true, Ordering::SeqCst);
    }

    pub fn release_fetch(&self) {
        self.fetch_gated.store(false, Ordering::SeqCst);
        self.fetch_gate.notify_one();
    }

    pub fn fail_profile_inserts(&self, fail: bool) {
        self.fail_profile_inserts.store(fail, Ordering::SeqCst);
    }

    pub fn fail_sign_out(&self, fail: bool) {
        self.fail_sign_out.store(fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn profile(&self, user_id: &str) -> Option<UserProfile> {
        self.lock().profiles.get(user_id).cloned()
    }

    pub fn put_profile(&self, profile: UserProfile) {
        self.lock().profiles.insert(profile.id.clone(), profile);
    }

    fn install(&self, session: AuthSession) -> AuthSession {
        self.lock().current = Some(session.clone());
        let _ = self
            .events
            .send(AuthEvent::new(AuthEventKind::SignedIn, Some(session.clone())));
        session
    }
}

impl IdentityProvider for MemoryProvider {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: &UserMetadata,
    ) -> Result<Identity, AuthError> {
        let mut state = self.lock();
        if state.accounts.contains_key(email) {
            return Err(AuthError::Provider {
                status: 422,
                message: "User already registered".into(),
            });
        }
        let mut user = Identity::new(format!("u-{}", state.accounts.len() + 1), Some(email.into()));
        user.metadata = metadata.clone();
        state
            .accounts
            .insert(email.to_string(), (password.to_string(), user.clone()));
        Ok(user)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let user = self
            .lock()
            .accounts
            .get(email)
            .filter(|(expected, _)| expected == password)
            .map(|(_, user)| user.clone())
            .ok_or_else(|| AuthError::InvalidCredentials("Invalid login credentials".into()))?;
        Ok(self.install(session_for(user)))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if self.fail_sign_out.load(Ordering::SeqCst) {
            return Err(AuthError::Provider {
                status: 500,
                message: "sign-out unavailable".into(),
            });
        }
        self.lock().current = None;
        let _ = self.events.send(AuthEvent::signed_out());
        Ok(())
    }

    async fn current_session(&self) -> Result<Option<AuthSession>, AuthError> {
        if self.fetch_gated.load(Ordering::SeqCst) {
            self.fetch_gate.notified().await;
        }
        Ok(self.lock().current.clone())
    }

    async fn sign_in_with_oauth(&self, _provider: &str) -> Result<Option<AuthSession>, AuthError> {
        let user = self.lock().oauth_identity.clone();
        Ok(user.map(|user| self.install(session_for(user))))
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }

    async fn fetch_profile(&self, user_id: &str) -> Result<Option<UserProfile>, AuthError> {
        Ok(self.profile(user_id))
    }

    async fn insert_profile(&self, profile: &UserProfile) -> Result<(), AuthError> {
        if self.fail_profile_inserts.load(Ordering::SeqCst) {
            return Err(AuthError::Provider {
                status: 403,
                message: "new row violates row-level security policy".into(),
            });
        }
        self.put_profile(profile.clone());
        Ok(())
    }
}
