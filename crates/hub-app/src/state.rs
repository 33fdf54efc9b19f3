//! Application state with an explicit lifecycle.
//!
//! Built once at startup from its collaborators and passed to whatever
//! renders it. [`AppState::shutdown`] (or dropping it) unsubscribes the
//! session listener.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use hub_auth::{IdentityProvider, SessionManager};
use hub_config::GeneralConfig;
use hub_core::{
    Category, FilterCriteria, GuardDecision, GuardState, Idea, IdeaDraft, IdeaPatch, Identity,
    NavigationGuard, Route, Session,
};
use hub_remote::IdeaApi;
use serde::Serialize;

use crate::error::StoreError;
use crate::store::{DeleteOutcome, IdeaStore, LoadOutcome};
use crate::view::{CategoryPill, DashboardView, IdeaCard};

/// Everything the dashboard renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardState {
    pub criteria: FilterCriteria,
    pub pills: Vec<CategoryPill>,
    pub cards: Vec<IdeaCard>,
    /// Size of the unfiltered collection.
    pub total: usize,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct AppState<P: IdentityProvider, A: IdeaApi> {
    session: SessionManager<P>,
    store: IdeaStore<A>,
    guard: Mutex<NavigationGuard>,
    view: Mutex<DashboardView>,
}

impl<P: IdentityProvider, A: IdeaApi> AppState<P, A> {
    /// Start the session manager and assemble the state. Must be called
    /// inside a Tokio runtime.
    pub fn start(provider: Arc<P>, api: A, general: &GeneralConfig) -> Self {
        tracing::debug!(default_category = %general.default_category, "starting application state");
        Self {
            session: SessionManager::start(provider),
            store: IdeaStore::new(api),
            guard: Mutex::new(NavigationGuard::new()),
            view: Mutex::new(DashboardView::new(general.default_category)),
        }
    }

    pub const fn session(&self) -> &SessionManager<P> {
        &self.session
    }

    pub const fn store(&self) -> &IdeaStore<A> {
        &self.store
    }

    fn guard(&self) -> MutexGuard<'_, NavigationGuard> {
        self.guard.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn view(&self) -> MutexGuard<'_, DashboardView> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Feed the current session to the guard and return its state.
    pub fn guard_state(&self) -> GuardState {
        let session = self.session.session();
        self.guard().observe(&session)
    }

    /// Wait for the session to resolve, then update the guard.
    pub async fn resolve_session(&self) -> Session {
        let session = self.session.wait_until_resolved().await;
        self.guard().observe(&session);
        session
    }

    /// What to show for `path` right now, without waiting.
    pub fn navigate(&self, path: &str) -> GuardDecision {
        let route = Route::resolve(path);
        self.guard_state();
        self.guard().decide(route)
    }

    /// The signed-in identity, if the guard lets protected actions through.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotAuthenticated` when no identity is signed in.
    pub async fn require_user(&self) -> Result<Identity, StoreError> {
        let session = self.resolve_session().await;
        match session.user {
            Some(user) if self.guard().state().permits_protected() => Ok(user),
            _ => Err(StoreError::NotAuthenticated),
        }
    }

    /// # Errors
    ///
    /// Returns `StoreError::Remote` if the fetch fails.
    pub async fn load_ideas(&self) -> Result<LoadOutcome, StoreError> {
        self.store.load().await
    }

    /// # Errors
    ///
    /// Returns `StoreError::NotAuthenticated` when signed out, otherwise as
    /// [`IdeaStore::create`].
    pub async fn create_idea(&self, draft: IdeaDraft) -> Result<Idea, StoreError> {
        let user = self.require_user().await?;
        self.store.create(draft, &user).await
    }

    /// # Errors
    ///
    /// Returns `StoreError::NotAuthenticated` when signed out, otherwise as
    /// [`IdeaStore::update`].
    pub async fn update_idea(&self, id: &str, patch: IdeaPatch) -> Result<Idea, StoreError> {
        self.require_user().await?;
        self.store.update(id, patch).await
    }

    /// # Errors
    ///
    /// Returns `StoreError::NotAuthenticated` when signed out, otherwise as
    /// [`IdeaStore::delete`].
    pub async fn delete_idea<F>(&self, id: &str, confirm: F) -> Result<DeleteOutcome, StoreError>
    where
        F: FnOnce(&Idea) -> bool + Send,
    {
        self.require_user().await?;
        self.store.delete(id, confirm).await
    }

    pub fn set_filter(&self, search: impl Into<String>, category: Category) {
        let mut view = self.view();
        view.set_search(search);
        view.select_category(category);
    }

    pub fn dashboard(&self) -> DashboardState {
        let snapshot = self.store.snapshot();
        let view = self.view();
        DashboardState {
            criteria: view.criteria().clone(),
            pills: view.pills(),
            cards: view.cards(&snapshot.ideas),
            total: snapshot.ideas.len(),
            loading: snapshot.loading,
            error: snapshot.error,
        }
    }

    pub fn shutdown(&self) {
        self.session.shutdown();
    }
}
