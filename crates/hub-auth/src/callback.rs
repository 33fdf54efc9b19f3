//! Resolution of the post-OAuth callback location.
//!
//! Waits for the session to resolve, makes sure the identity has a profile
//! record, and decides where to go next. No identity is a normal outcome,
//! not an error.

use hub_core::{Identity, Route, UserProfile};
use serde::Serialize;

use crate::error::AuthError;
use crate::manager::SessionManager;
use crate::provider::IdentityProvider;

pub const PROFILE_SETUP_FAILED: &str = "Failed to setup profile. Redirecting to dashboard...";
pub const NO_USER_FOUND: &str = "No user found. Redirecting to sign in...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallbackOutcome {
    pub destination: Route,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Identity>,
    /// Whether a profile record was created on this visit.
    pub profile_created: bool,
}

/// Settle the callback once the session has resolved.
pub async fn resolve_callback<P: IdentityProvider>(manager: &SessionManager<P>) -> CallbackOutcome {
    let session = manager.wait_until_resolved().await;
    let Some(user) = session.user else {
        return CallbackOutcome {
            destination: Route::SignIn,
            message: Some(NO_USER_FOUND.into()),
            user: None,
            profile_created: false,
        };
    };

    match ensure_profile(manager.provider(), &user).await {
        Ok(created) => CallbackOutcome {
            destination: Route::Dashboard,
            message: None,
            user: Some(user),
            profile_created: created,
        },
        Err(error) => {
            tracing::warn!(user_id = %user.id, %error, "profile bootstrap at callback failed");
            CallbackOutcome {
                destination: Route::Dashboard,
                message: Some(PROFILE_SETUP_FAILED.into()),
                user: Some(user),
                profile_created: false,
            }
        }
    }
}

/// Insert a profile for `user` unless one already exists. Returns whether
/// one was created.
///
/// # Errors
///
/// Returns the provider's error if the lookup or the insert fails.
pub async fn ensure_profile<P: IdentityProvider>(
    provider: &P,
    user: &Identity,
) -> Result<bool, AuthError> {
    if provider.fetch_profile(&user.id).await?.is_some() {
        return Ok(false);
    }
    provider.insert_profile(&UserProfile::for_oauth(user)).await?;
    tracing::info!(user_id = %user.id, "created profile for new identity");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::test_support::MemoryProvider;
    use hub_core::DEFAULT_PROFILE_NAME;
    use pretty_assertions::assert_eq;

    fn octocat() -> Identity {
        let mut user = Identity::new("gh-1", Some("octo@example.com".into()));
        user.metadata.name = Some("octocat".into());
        user
    }

    #[tokio::test]
    async fn first_visit_creates_profile_from_metadata() {
        let provider = Arc::new(MemoryProvider::new());
        provider.set_current(Some(octocat()));
        let manager = SessionManager::start(Arc::clone(&provider));

        let outcome = resolve_callback(&manager).await;
        assert_eq!(outcome.destination, Route::Dashboard);
        assert_eq!(outcome.message, None);
        assert!(outcome.profile_created);
        assert_eq!(
            provider.profile("gh-1").unwrap().full_name.as_deref(),
            Some("octocat")
        );
    }

    #[tokio::test]
    async fn existing_profile_is_left_alone() {
        let provider = Arc::new(MemoryProvider::new());
        provider.set_current(Some(octocat()));
        provider.put_profile(UserProfile {
            id: "gh-1".into(),
            full_name: Some("The Octocat".into()),
            email: None,
        });
        let manager = SessionManager::start(Arc::clone(&provider));

        let outcome = resolve_callback(&manager).await;
        assert!(!outcome.profile_created);
        assert_eq!(
            provider.profile("gh-1").unwrap().full_name.as_deref(),
            Some("The Octocat")
        );
    }

    #[tokio::test]
    async fn nameless_identity_gets_default_profile_name() {
        let provider = Arc::new(MemoryProvider::new());
        provider.set_current(Some(Identity::new("gh-2", None)));
        let manager = SessionManager::start(Arc::clone(&provider));

        resolve_callback(&manager).await;
        assert_eq!(
            provider.profile("gh-2").unwrap().full_name.as_deref(),
            Some(DEFAULT_PROFILE_NAME)
        );
    }

    #[tokio::test]
    async fn insert_failure_still_goes_to_dashboard() {
        let provider = Arc::new(MemoryProvider::new());
        provider.set_current(Some(octocat()));
        provider.fail_profile_inserts(true);
        let manager = SessionManager::start(provider);

        let outcome = resolve_callback(&manager).await;
        assert_eq!(outcome.destination, Route::Dashboard);
        assert_eq!(outcome.message.as_deref(), Some(PROFILE_SETUP_FAILED));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn oauth_sign_in_then_callback_lands_on_dashboard() {
        for _ in 0..50 {
            let provider = Arc::new(MemoryProvider::new());
            provider.set_oauth_identity(Some(octocat()));
            let manager = SessionManager::start(Arc::clone(&provider));
            manager.wait_until_resolved().await;

            let user = manager.sign_in_with_oauth("github").await.unwrap();
            assert_eq!(user, Some(octocat()));

            let outcome = resolve_callback(&manager).await;
            assert_eq!(outcome.destination, Route::Dashboard);
            assert_eq!(outcome.message, None);
            assert_eq!(outcome.user, Some(octocat()));
            assert!(outcome.profile_created);
            assert!(provider.profile("gh-1").is_some());
        }
    }

    #[tokio::test]
    async fn cancelled_oauth_then_callback_routes_to_sign_in() {
        let provider = Arc::new(MemoryProvider::new());
        let manager = SessionManager::start(Arc::clone(&provider));
        manager.wait_until_resolved().await;

        assert_eq!(manager.sign_in_with_oauth("github").await.unwrap(), None);
        let outcome = resolve_callback(&manager).await;
        assert_eq!(outcome.destination, Route::SignIn);
        assert_eq!(outcome.message.as_deref(), Some(NO_USER_FOUND));
    }

    #[tokio::test]
    async fn no_identity_routes_to_sign_in() {
        let manager = SessionManager::start(Arc::new(MemoryProvider::new()));

        let outcome = resolve_callback(&manager).await;
        assert_eq!(
            outcome,
            CallbackOutcome {
                destination: Route::SignIn,
                message: Some(NO_USER_FOUND.into()),
                user: None,
                profile_created: false,
            }
        );
    }
}
