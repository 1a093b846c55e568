// SPDX-FileCopyrightText: 2026 Hearth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for session bootstrap, login, and logout flows.

use std::sync::Arc;

use hearth_client::{ApiClient, SessionManager, SessionState, TokenStore};
use hearth_config::model::ApiConfig;
use secrecy::ExposeSecret;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Harness {
    _dir: TempDir,
    tokens: Arc<TokenStore>,
    session: SessionManager,
}

fn harness(base_url: &str, stored_token: Option<&str>) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let tokens = Arc::new(TokenStore::at(dir.path().join("token")));
    if let Some(token) = stored_token {
        tokens.save(token).unwrap();
    }
    let config = ApiConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
    };
    let api = Arc::new(ApiClient::new(&config, tokens.clone()).unwrap());
    Harness {
        _dir: dir,
        tokens,
        session: SessionManager::new(api),
    }
}

fn user_body() -> serde_json::Value {
    serde_json::json!({
        "status": "success",
        "data": {
            "user": {
                "_id": "u1",
                "name": "Ada Obi",
                "email": "ada@example.com",
                "role": "user"
            }
        }
    })
}

#[tokio::test]
async fn bootstrap_with_valid_token_yields_authenticated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("authorization", "Bearer tok-good"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body()))
        .mount(&server)
        .await;

    let h = harness(&server.uri(), Some("tok-good"));
    let state = h.session.bootstrap().await;

    let SessionState::Authenticated(user) = state else {
        panic!("expected authenticated, got {state}");
    };
    // Exactly the fields /users/me returned.
    assert_eq!(user.id.0, "u1");
    assert_eq!(user.name, "Ada Obi");
    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.role, hearth_core::Role::User);
    assert!(user.agent_status.is_none());
}

#[tokio::test]
async fn bootstrap_with_rejected_token_clears_it() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"status": "fail", "message": "jwt expired"})),
        )
        .mount(&server)
        .await;

    let h = harness(&server.uri(), Some("tok-stale"));
    let state = h.session.bootstrap().await;

    assert!(matches!(state, SessionState::Unauthenticated));
    assert!(h.tokens.current().is_none(), "stale token must be cleared");
}

#[tokio::test]
async fn bootstrap_without_token_settles_unauthenticated_without_calling() {
    let server = MockServer::start().await;
    // No mocks mounted: any request would 404 and the test would still pass,
    // so assert via received_requests instead.
    let h = harness(&server.uri(), None);
    let state = h.session.bootstrap().await;

    assert!(matches!(state, SessionState::Unauthenticated));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn login_persists_token_then_reverifies_identity() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "token": "tok-fresh",
            "data": { "user": { "_id": "u1", "name": "Ada Obi", "email": "ada@example.com", "role": "user" } }
        })))
        .mount(&server)
        .await;
    // The verification call must carry the freshly issued token.
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("authorization", "Bearer tok-fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body()))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server.uri(), None);
    let user = h.session.login("ada@example.com", "correct-horse").await.unwrap();

    assert_eq!(user.email, "ada@example.com");
    assert_eq!(h.tokens.current().unwrap().expose_secret(), "tok-fresh");
    assert!(h.session.state().await.is_authenticated());
}

#[tokio::test]
async fn login_with_bad_credentials_surfaces_the_401() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(
            serde_json::json!({"status": "fail", "message": "Incorrect email or password"}),
        ))
        .mount(&server)
        .await;

    let h = harness(&server.uri(), None);
    let err = h.session.login("ada@example.com", "wrong").await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Incorrect email or password");
    assert!(!h.session.state().await.is_authenticated());
}

#[tokio::test]
async fn signup_runs_the_same_verification_as_login() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/signup"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "status": "success",
            "token": "tok-new",
            "data": { "user": { "_id": "u2", "name": "New User", "email": "new@example.com", "role": "user" } }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("authorization", "Bearer tok-new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "user": { "_id": "u2", "name": "New User", "email": "new@example.com", "role": "user" } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server.uri(), None);
    let user = h
        .session
        .signup(&hearth_client::SignupRequest {
            name: "New User".into(),
            email: "new@example.com".into(),
            password: "pw123456".into(),
            password_confirm: "pw123456".into(),
        })
        .await
        .unwrap();

    assert_eq!(user.id.0, "u2");
    assert!(h.session.state().await.is_authenticated());
}

#[tokio::test]
async fn logout_clears_session_even_when_server_call_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body()))
        .mount(&server)
        .await;
    // Server-side logout fails every time.
    Mock::given(method("GET"))
        .and(path("/users/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let h = harness(&server.uri(), Some("tok-good"));
    h.session.bootstrap().await;
    assert!(h.session.state().await.is_authenticated());

    let reconciliation = h.session.logout().await;

    // Cleared immediately, before the background call settles.
    assert!(matches!(
        h.session.state().await,
        SessionState::Unauthenticated
    ));
    assert!(h.tokens.current().is_none());

    // Let the fire-and-forget task run its course; the session must stay
    // cleared regardless of the server's answer.
    let _ = tokio::time::timeout(std::time::Duration::from_secs(10), reconciliation).await;
    assert!(matches!(
        h.session.state().await,
        SessionState::Unauthenticated
    ));
}

#[tokio::test]
async fn a_401_on_a_data_call_invalidates_the_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body()))
        .mount(&server)
        .await;

    let h = harness(&server.uri(), Some("tok-good"));
    h.session.bootstrap().await;

    let expired = hearth_core::HearthError::api("please log in again", 401);
    assert!(h.session.note_failure(&expired).await);
    assert!(matches!(
        h.session.state().await,
        SessionState::Unauthenticated
    ));
    assert!(h.tokens.current().is_none());

    // Non-auth failures leave the session alone.
    let conflict = hearth_core::HearthError::api("already confirmed", 409);
    assert!(!h.session.note_failure(&conflict).await);
}
