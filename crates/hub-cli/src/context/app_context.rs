use std::sync::Arc;

use anyhow::Context;
use hub_app::{AppState, IdeaStore};
use hub_auth::{SessionStore, SupabaseProvider};
use hub_config::HubConfig;
use hub_core::Session;
use hub_remote::ApiClient;

/// Shared resources built once per invocation.
pub struct HubContext {
    pub config: HubConfig,
    pub api: ApiClient,
}

impl HubContext {
    pub fn init(config: HubConfig) -> anyhow::Result<Self> {
        let api = ApiClient::from_config(&config.api).context("failed to build idea API client")?;
        Ok(Self { config, api })
    }

    /// A fresh store over the idea API. Reading ideas needs no identity.
    pub fn store(&self) -> IdeaStore<ApiClient> {
        IdeaStore::new(self.api.clone())
    }

    /// The hosted identity provider, with sessions persisted in the system keychain.
    pub fn provider(&self) -> anyhow::Result<Arc<SupabaseProvider>> {
        let provider = SupabaseProvider::new(self.config.identity.clone(), SessionStore::System)
            .context("identity provider unavailable (set IDEAHUB_IDENTITY__URL and IDEAHUB_IDENTITY__ANON_KEY)")?;
        Ok(Arc::new(provider))
    }

    /// Session manager, store, guard and view wired together.
    pub fn app(&self) -> anyhow::Result<AppState<SupabaseProvider, ApiClient>> {
        Ok(AppState::start(self.provider()?, self.api.clone(), &self.config.general))
    }

    /// The resolved session, or signed out when no identity provider is configured.
    pub async fn current_session(&self) -> anyhow::Result<Session> {
        if !self.config.identity.is_configured() {
            return Ok(Session::resolved(None));
        }
        let app = self.app()?;
        let session = app.resolve_session().await;
        app.shutdown();
        Ok(session)
    }
}
