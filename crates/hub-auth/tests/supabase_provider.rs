//! `SupabaseProvider` against an in-process stand-in for the hosted project.

mod support;

use hub_auth::{
    AuthError, AuthEventKind, AuthSession, IdentityProvider, SessionStore, SupabaseProvider,
};
use hub_config::IdentityConfig;
use hub_core::{Identity, UserMetadata, UserProfile};
use pretty_assertions::assert_eq;
use support::MockProvider;
use tempfile::TempDir;

const TOKEN_BODY: &str = r#"{
    "access_token": "access-1",
    "token_type": "bearer",
    "expires_in": 3600,
    "refresh_token": "refresh-1",
    "user": {"id": "u1", "email": "ada@example.com", "user_metadata": {"full_name": "Ada"}}
}"#;

fn provider(server: &MockProvider, dir: &TempDir) -> SupabaseProvider {
    let config = IdentityConfig {
        url: server.base_url.clone(),
        anon_key: "anon-key".into(),
        ..IdentityConfig::default()
    };
    SupabaseProvider::new(config, SessionStore::File(dir.path().join("session.json"))).unwrap()
}

fn stored(dir: &TempDir) -> Option<AuthSession> {
    SessionStore::File(dir.path().join("session.json")).load()
}

#[tokio::test]
async fn sign_in_installs_session_and_announces_it() {
    let server = MockProvider::start(Box::new(|method, url, body| {
        assert_eq!((method, url), ("POST", "/auth/v1/token?grant_type=password"));
        let sent: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(sent["email"], "ada@example.com");
        (200, TOKEN_BODY.into())
    }));
    let dir = TempDir::new().unwrap();
    let provider = provider(&server, &dir);
    let mut events = provider.subscribe();

    let session = provider.sign_in("ada@example.com", "hunter22").await.unwrap();
    assert_eq!(session.user.id, "u1");
    assert_eq!(session.user.author_name(), "Ada");
    assert!(session.expires_at.is_some());

    let event = events.recv().await.unwrap();
    assert_eq!(event.kind, AuthEventKind::SignedIn);
    assert_eq!(event.identity().map(|u| u.id), Some("u1".into()));
    assert_eq!(stored(&dir).map(|s| s.access_token), Some("access-1".into()));

    let request = &server.requests()[0];
    assert_eq!(request.apikey.as_deref(), Some("anon-key"));
}

#[tokio::test]
async fn bad_credentials_map_to_invalid_credentials() {
    let server = MockProvider::start(Box::new(|_, _, _| {
        (
            400,
            r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#.into(),
        )
    }));
    let dir = TempDir::new().unwrap();
    let provider = provider(&server, &dir);

    let err = provider.sign_in("ada@example.com", "nope").await.unwrap_err();
    assert!(matches!(&err, AuthError::InvalidCredentials(m) if m == "Invalid login credentials"));
    assert!(stored(&dir).is_none());
}

#[tokio::test]
async fn server_errors_stay_provider_errors() {
    let server = MockProvider::start(Box::new(|_, _, _| (503, String::new())));
    let dir = TempDir::new().unwrap();

    let err = provider(&server, &dir)
        .sign_in("ada@example.com", "hunter22")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Provider { status: 503, .. }));
}

#[tokio::test]
async fn sign_up_pending_confirmation_returns_user() {
    let server = MockProvider::start(Box::new(|method, url, body| {
        assert_eq!(method, "POST");
        assert!(url.starts_with("/auth/v1/signup?redirect_to=https%3A%2F%2Fapp.example"));
        let sent: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(sent["data"]["full_name"], "Ada Lovelace");
        (
            200,
            r#"{"id":"u2","email":"ada@example.com","user_metadata":{"full_name":"Ada Lovelace"}}"#
                .into(),
        )
    }));
    let dir = TempDir::new().unwrap();
    let config = IdentityConfig {
        url: server.base_url.clone(),
        anon_key: "anon-key".into(),
        email_redirect_url: "https://app.example/logindashboard".into(),
        ..IdentityConfig::default()
    };
    let provider =
        SupabaseProvider::new(config, SessionStore::File(dir.path().join("session.json"))).unwrap();

    let metadata = UserMetadata {
        full_name: Some("Ada Lovelace".into()),
        name: None,
    };
    let user = provider
        .sign_up("ada@example.com", "hunter22", &metadata)
        .await
        .unwrap();
    assert_eq!(user.id, "u2");
    assert!(stored(&dir).is_none(), "no session until confirmed");
}

#[tokio::test]
async fn sign_up_with_session_signs_in() {
    let server = MockProvider::start(Box::new(|_, _, _| (200, TOKEN_BODY.into())));
    let dir = TempDir::new().unwrap();
    let provider = provider(&server, &dir);
    let mut events = provider.subscribe();

    let user = provider
        .sign_up("ada@example.com", "hunter22", &UserMetadata::default())
        .await
        .unwrap();
    assert_eq!(user.id, "u1");
    assert_eq!(events.recv().await.unwrap().kind, AuthEventKind::SignedIn);
    assert!(stored(&dir).is_some());
}

#[tokio::test]
async fn sign_out_revokes_and_clears() {
    let server = MockProvider::start(Box::new(|_, url, _| {
        if url.starts_with("/auth/v1/token") {
            (200, TOKEN_BODY.into())
        } else {
            assert_eq!(url, "/auth/v1/logout?scope=global");
            (204, String::new())
        }
    }));
    let dir = TempDir::new().unwrap();
    let provider = provider(&server, &dir);
    provider.sign_in("ada@example.com", "hunter22").await.unwrap();
    let mut events = provider.subscribe();

    provider.sign_out().await.unwrap();
    assert_eq!(events.recv().await.unwrap().kind, AuthEventKind::SignedOut);
    assert!(stored(&dir).is_none());
    assert_eq!(provider.current_session().await.unwrap(), None);

    let logout = server.requests().pop().unwrap();
    assert_eq!(logout.authorization.as_deref(), Some("Bearer access-1"));
}

#[tokio::test]
async fn failed_sign_out_keeps_session() {
    let server = MockProvider::start(Box::new(|_, url, _| {
        if url.starts_with("/auth/v1/token") {
            (200, TOKEN_BODY.into())
        } else {
            (500, r#"{"msg":"boom"}"#.into())
        }
    }));
    let dir = TempDir::new().unwrap();
    let provider = provider(&server, &dir);
    provider.sign_in("ada@example.com", "hunter22").await.unwrap();

    let err = provider.sign_out().await.unwrap_err();
    assert_eq!(err.user_message(), "boom");
    assert!(stored(&dir).is_some());
}

#[tokio::test]
async fn stored_session_near_expiry_is_refreshed() {
    let server = MockProvider::start(Box::new(|method, url, body| {
        assert_eq!((method, url), ("POST", "/auth/v1/token?grant_type=refresh_token"));
        let sent: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(sent["refresh_token"], "old-refresh");
        (200, TOKEN_BODY.into())
    }));
    let dir = TempDir::new().unwrap();
    SessionStore::File(dir.path().join("session.json"))
        .save(&AuthSession {
            access_token: "old-access".into(),
            refresh_token: "old-refresh".into(),
            expires_at: Some(chrono::Utc::now().timestamp() + 10),
            user: Identity::new("u1", None),
        })
        .unwrap();
    let provider = provider(&server, &dir);
    let mut events = provider.subscribe();

    let session = provider.current_session().await.unwrap().unwrap();
    assert_eq!(session.access_token, "access-1");
    assert_eq!(events.recv().await.unwrap().kind, AuthEventKind::TokenRefreshed);
    assert_eq!(stored(&dir).map(|s| s.refresh_token), Some("refresh-1".into()));
}

#[tokio::test]
async fn rejected_refresh_signs_out() {
    let server = MockProvider::start(Box::new(|_, _, _| {
        (400, r#"{"error_description":"Invalid Refresh Token"}"#.into())
    }));
    let dir = TempDir::new().unwrap();
    SessionStore::File(dir.path().join("session.json"))
        .save(&AuthSession {
            access_token: "old-access".into(),
            refresh_token: "revoked".into(),
            expires_at: Some(chrono::Utc::now().timestamp() - 10),
            user: Identity::new("u1", None),
        })
        .unwrap();

    let provider = provider(&server, &dir);
    assert_eq!(provider.current_session().await.unwrap(), None);
    assert!(stored(&dir).is_none());
}

#[tokio::test]
async fn fresh_stored_session_is_used_without_requests() {
    let server = MockProvider::start(Box::new(|_, _, _| (500, String::new())));
    let dir = TempDir::new().unwrap();
    let session = AuthSession {
        access_token: "still-good".into(),
        refresh_token: "r".into(),
        expires_at: Some(chrono::Utc::now().timestamp() + 3600),
        user: Identity::new("u1", None),
    };
    SessionStore::File(dir.path().join("session.json"))
        .save(&session)
        .unwrap();

    let provider = provider(&server, &dir);
    assert_eq!(provider.current_session().await.unwrap(), Some(session));
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn profile_lookup_and_insert() {
    let server = MockProvider::start(Box::new(|method, url, body| match method {
        "GET" => {
            assert_eq!(url, "/rest/v1/user_profiles?id=eq.u1&select=id,full_name,email");
            (200, "[]".into())
        }
        "POST" => {
            assert_eq!(url, "/rest/v1/user_profiles");
            let rows: Vec<UserProfile> = serde_json::from_str(body).unwrap();
            assert_eq!(rows[0].full_name.as_deref(), Some("octocat"));
            (201, String::new())
        }
        other => panic!("unexpected {other}"),
    }));
    let dir = TempDir::new().unwrap();
    let provider = provider(&server, &dir);

    assert_eq!(provider.fetch_profile("u1").await.unwrap(), None);
    provider
        .insert_profile(&UserProfile {
            id: "u1".into(),
            full_name: Some("octocat".into()),
            email: None,
        })
        .await
        .unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    // Anonymous requests authorize as the anon role.
    assert_eq!(requests[1].authorization.as_deref(), Some("Bearer anon-key"));
}
