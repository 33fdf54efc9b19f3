//! The single owner of the client's [`Session`].
//!
//! Two writers race at startup: the one-shot fetch of the provider's current
//! session and the long-lived listener on provider events. Every write takes
//! a number from one monotonic counter when it is issued (the fetch before
//! its request goes out, an event when it is delivered) and is applied only
//! if it is newer than the last applied write. A slow initial fetch can
//! therefore never overwrite a sign-in or sign-out that happened meanwhile.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use hub_core::{Identity, Session, UserMetadata, UserProfile};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::error::AuthError;
use crate::provider::{AuthOutcome, IdentityProvider};

struct Shared {
    next_seq: AtomicU64,
    last_applied: Mutex<u64>,
    tx: watch::Sender<Session>,
}

impl Shared {
    fn issue(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Publish `user` if `seq` is newer than anything applied so far.
    fn apply(&self, seq: u64, user: Option<Identity>, source: &'static str) -> bool {
        let mut last = self
            .last_applied
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if seq <= *last {
            tracing::debug!(seq, last = *last, source, "discarding stale session write");
            return false;
        }
        *last = seq;
        tracing::debug!(
            seq,
            source,
            user_id = user.as_ref().map_or("-", |u| u.id.as_str()),
            "session updated"
        );
        self.tx.send_replace(Session::resolved(user));
        true
    }

    /// Issue and apply in one step, for writes made by the manager itself.
    fn write(&self, user: Option<Identity>, source: &'static str) {
        let seq = self.issue();
        self.apply(seq, user, source);
    }
}

pub struct SessionManager<P: IdentityProvider> {
    provider: Arc<P>,
    shared: Arc<Shared>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl<P: IdentityProvider> SessionManager<P> {
    /// Subscribe to provider events, then fetch the current session.
    ///
    /// Must be called inside a Tokio runtime. The session starts as
    /// `{ user: None, loading: true }` and resolves when either writer lands.
    pub fn start(provider: Arc<P>) -> Self {
        let (tx, _) = watch::channel(Session::initial());
        let shared = Arc::new(Shared {
            next_seq: AtomicU64::new(0),
            last_applied: Mutex::new(0),
            tx,
        });

        let mut events = provider.subscribe();
        let fetch_seq = shared.issue();

        let listener = tokio::spawn({
            let shared = Arc::clone(&shared);
            async move {
                loop {
                    match events.recv().await {
                        Ok(event) => {
                            let seq = shared.issue();
                            shared.apply(seq, event.identity(), event.kind.as_str());
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "session listener fell behind provider events");
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            }
        });

        let fetch = tokio::spawn({
            let shared = Arc::clone(&shared);
            let provider = Arc::clone(&provider);
            async move {
                let user = match provider.current_session().await {
                    Ok(session) => session.map(|s| s.user),
                    Err(error) => {
                        tracing::warn!(%error, "initial session fetch failed; treating as signed out");
                        None
                    }
                };
                shared.apply(fetch_seq, user, "initial_fetch");
            }
        });

        Self {
            provider,
            shared,
            tasks: Mutex::new(vec![listener, fetch]),
        }
    }

    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Current snapshot.
    #[must_use]
    pub fn session(&self) -> Session {
        self.shared.tx.borrow().clone()
    }

    /// Change notifications for every published session.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.shared.tx.subscribe()
    }

    /// Wait until `loading` is false and return that session.
    pub async fn wait_until_resolved(&self) -> Session {
        let mut rx = self.subscribe();
        match rx.wait_for(|session| !session.loading).await {
            Ok(session) => session.clone(),
            // The sender lives in `self`, so this is unreachable in practice.
            Err(_) => self.session(),
        }
    }

    /// Create an account and bootstrap its profile.
    ///
    /// The new identity becomes current as soon as the provider accepts it.
    /// A failed profile insert is reported after that, so the caller sees
    /// an error while the user is already signed in.
    ///
    /// # Errors
    ///
    /// Returns the provider's error if the account cannot be created, or
    /// `AuthError::ProfileBootstrap` if the profile record cannot be written.
    pub async fn sign_up(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> Result<Identity, AuthError> {
        let metadata = UserMetadata {
            full_name: Some(full_name.to_string()),
            name: None,
        };
        let user = self.provider.sign_up(email, password, &metadata).await?;
        self.shared.write(Some(user.clone()), "sign_up");

        let profile = UserProfile::for_sign_up(&user, full_name);
        if let Err(error) = self.provider.insert_profile(&profile).await {
            tracing::warn!(user_id = %user.id, %error, "profile insert after sign-up failed");
            return Err(AuthError::ProfileBootstrap {
                user_id: user.id,
                reason: error.to_string(),
            });
        }
        Ok(user)
    }

    /// Email/password sign-in. Failures come back as values; the identity
    /// itself arrives through the provider's event stream.
    pub async fn sign_in(&self, email: &str, password: &str) -> AuthOutcome {
        match self.provider.sign_in(email, password).await {
            Ok(_) => AuthOutcome::succeeded(),
            Err(error) => {
                tracing::warn!(%error, "sign-in failed");
                AuthOutcome::failed(error.user_message())
            }
        }
    }

    /// End the session. On a provider failure the current identity is kept.
    ///
    /// # Errors
    ///
    /// Returns the provider's error unchanged.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.provider.sign_out().await?;
        self.shared.write(None, "sign_out");
        Ok(())
    }

    /// Run the third-party redirect flow. `Ok(None)` when the user cancels.
    ///
    /// The exchanged identity is current when this returns, so a callback
    /// resolved right after it sees the new user.
    ///
    /// # Errors
    ///
    /// Returns the provider's error if the redirect flow or code exchange fails.
    pub async fn sign_in_with_oauth(&self, provider: &str) -> Result<Option<Identity>, AuthError> {
        let Some(session) = self.provider.sign_in_with_oauth(provider).await? else {
            return Ok(None);
        };
        self.shared.write(Some(session.user.clone()), "oauth");
        Ok(Some(session.user))
    }

    /// Stop the listener and any in-flight fetch. Idempotent.
    pub fn shutdown(&self) {
        let tasks = std::mem::take(&mut *self.tasks.lock().unwrap_or_else(PoisonError::into_inner));
        if !tasks.is_empty() {
            tracing::debug!("session manager shutting down");
        }
        for task in tasks {
            task.abort();
        }
    }
}

impl<P: IdentityProvider> Drop for SessionManager<P> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
