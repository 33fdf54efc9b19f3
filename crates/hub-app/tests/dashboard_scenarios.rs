//! Whole-stack dashboard flows: real `ApiClient` over HTTP, in-memory identity.

mod support;

use std::sync::Arc;
use std::time::Duration;

use hub_app::{AppState, DeleteOutcome, StoreError, load_landing};
use hub_auth::AuthOutcome;
use hub_auth::test_support::MemoryProvider;
use hub_config::GeneralConfig;
use hub_core::{Category, IdeaDraft, IdeaPatch, Identity};
use hub_remote::ApiClient;
use pretty_assertions::assert_eq;
use serde_json::json;
use support::IdeaServer;

fn app(server: &IdeaServer, provider: &Arc<MemoryProvider>) -> AppState<MemoryProvider, ApiClient> {
    let api = ApiClient::new(&server.base_url, Duration::from_secs(5)).unwrap();
    AppState::start(Arc::clone(provider), api, &GeneralConfig::default())
}

fn lin() -> Identity {
    let mut user = Identity::new("u-lin", Some("lin@example.com".into()));
    user.metadata.full_name = Some("Lin Chen".into());
    user
}

#[tokio::test]
async fn load_defaults_author_then_update_changes_only_title() {
    let server = IdeaServer::start(vec![json!({
        "id": "1", "title": "X", "description": "Y", "category": "Programming", "user_id": "u1"
    })]);
    let provider = Arc::new(MemoryProvider::new());
    provider.set_current(Some(lin()));
    let app = app(&server, &provider);

    app.load_ideas().await.unwrap();
    let ideas = app.store().ideas();
    assert_eq!(ideas.len(), 1);
    assert_eq!(ideas[0].user_name.as_deref(), Some("Anonymous"));

    let patch = IdeaPatch {
        title: Some("Z".into()),
        ..IdeaPatch::default()
    };
    app.update_idea("1", patch).await.unwrap();

    let updated = &app.store().ideas()[0];
    assert_eq!(updated.title, "Z");
    assert_eq!(updated.description, "Y");
    assert_eq!(updated.category.as_deref(), Some("Programming"));
    assert_eq!(updated.user_id, "u1");
}

#[tokio::test]
async fn create_then_list_has_exactly_one_copy() {
    let server = IdeaServer::start(vec![]);
    let provider = Arc::new(MemoryProvider::new());
    provider.set_current(Some(lin()));
    let app = app(&server, &provider);
    app.load_ideas().await.unwrap();

    let created = app
        .create_idea(IdeaDraft {
            title: "Night sky".into(),
            description: "Star trails over the lake".into(),
            category: Some(Category::Photography),
        })
        .await
        .unwrap();
    let id = created.id.clone().unwrap();
    assert_eq!(created.user_name.as_deref(), Some("Lin Chen"));

    app.load_ideas().await.unwrap();
    let copies = app
        .store()
        .ideas()
        .into_iter()
        .filter(|i| i.id.as_deref() == Some(id.as_str()))
        .count();
    assert_eq!(copies, 1);
}

#[tokio::test]
async fn failed_remote_delete_keeps_the_idea() {
    let server = IdeaServer::start(vec![json!({"id": "7", "title": "Keep me", "user_id": "u-lin"})]);
    let provider = Arc::new(MemoryProvider::new());
    provider.set_current(Some(lin()));
    let app = app(&server, &provider);
    app.load_ideas().await.unwrap();

    server.fail("DELETE");
    let err = app.delete_idea("7", |_| true).await.unwrap_err();
    assert!(matches!(err, StoreError::Remote { .. }));
    assert_eq!(app.store().get("7").unwrap().title, "Keep me");
    assert_eq!(app.dashboard().error.as_deref(), Some("Failed to delete idea"));

    server.failing.lock().unwrap().clear();
    let outcome = app.delete_idea("7", |_| true).await.unwrap();
    assert!(matches!(outcome, DeleteOutcome::Deleted(_)));
    assert!(server.ideas.lock().unwrap().is_empty());
}

#[tokio::test]
async fn wrong_password_leaves_session_signed_out() {
    let server = IdeaServer::start(vec![]);
    let provider = Arc::new(MemoryProvider::new());
    provider.register("lin@example.com", "correct horse", lin());
    let app = app(&server, &provider);
    app.resolve_session().await;

    let outcome = app.session().sign_in("lin@example.com", "battery staple").await;
    assert_eq!(outcome, AuthOutcome::failed("Invalid login credentials"));

    let session = app.session().session();
    assert_eq!(session.user, None);
    assert!(!session.loading);
}

#[tokio::test]
async fn landing_counts_and_features_from_server() {
    let server = IdeaServer::start(vec![json!({"id": "1", "title": "Only one"})]);
    let api = ApiClient::new(&server.base_url, Duration::from_secs(5)).unwrap();

    let landing = load_landing(&api, &mut rand::thread_rng()).await;
    assert_eq!(landing.stats.total_ideas, 1);
    assert_eq!(landing.featured.unwrap().title, "Only one");
}
