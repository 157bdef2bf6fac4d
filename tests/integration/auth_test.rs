//! Login, lockout, and bearer token integration tests.

use http::StatusCode;

use crate::helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new().await;
    app.create_user("alice").await;

    let response = app.try_login("alice", PASSWORD).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["login"], "alice");
    assert_eq!(response.body["email"], "alice@test.com");
    assert_eq!(response.body["dob"], "1990-04-01");
    assert!(response.body["access_token"].as_str().is_some());
    assert!(response.body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new().await;
    app.create_user("alice").await;

    let response = app.try_login("alice", "wrong-password").await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "Unable to login");
    assert!(response.retry_after.is_none());
}

#[tokio::test]
async fn test_login_unknown_account_matches_wrong_password() {
    let app = TestApp::new().await;

    let response = app.try_login("nobody", "whatever").await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "Unable to login");
}

#[tokio::test]
async fn test_login_missing_fields() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/user/login",
            Some(serde_json::json!({ "login": "alice" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Please provide login and password");
}

#[tokio::test]
async fn test_third_failure_locks_account() {
    let app = TestApp::new().await;
    app.create_user("alice").await;

    for _ in 0..2 {
        let response = app.try_login("alice", "wrong-password").await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        app.clock.advance_secs(1);
    }

    let response = app.try_login("alice", "wrong-password").await;

    assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.retry_after, Some(60));
    assert_eq!(response.body["blocked"], true);
    assert_eq!(response.body["time"], 60);
    assert_eq!(
        response.message(),
        "Your account has been blocked for 1 min"
    );
}

#[tokio::test]
async fn test_locked_account_rejects_correct_password() {
    let app = TestApp::new().await;
    app.create_user("alice").await;

    for _ in 0..3 {
        app.try_login("alice", "wrong-password").await;
    }
    app.clock.advance_secs(20);

    let response = app.try_login("alice", PASSWORD).await;

    assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.body["time"], 40);
    assert_eq!(response.retry_after, Some(40));
}

#[tokio::test]
async fn test_refused_attempts_do_not_extend_lockout() {
    let app = TestApp::new().await;
    app.create_user("alice").await;

    for _ in 0..3 {
        app.try_login("alice", "wrong-password").await;
    }
    app.clock.advance_secs(30);
    app.try_login("alice", "wrong-password").await;
    app.clock.advance_secs(29);

    let response = app.try_login("alice", "wrong-password").await;
    assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.body["time"], 1);

    app.clock.advance_secs(1);
    let response = app.try_login("alice", PASSWORD).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_lockout_expires_at_window_boundary() {
    let app = TestApp::new().await;
    app.create_user("alice").await;

    for _ in 0..3 {
        app.try_login("alice", "wrong-password").await;
    }

    app.clock.advance_secs(59);
    let response = app.try_login("alice", PASSWORD).await;
    assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.body["time"], 1);

    app.clock.advance_secs(1);
    let response = app.try_login("alice", PASSWORD).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_success_resets_failure_streak() {
    let app = TestApp::new().await;
    app.create_user("alice").await;

    app.try_login("alice", "wrong-password").await;
    app.try_login("alice", "wrong-password").await;
    app.login("alice", PASSWORD).await;

    let response = app.try_login("alice", "wrong-password").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    let response = app.try_login("alice", "wrong-password").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_lockout_is_per_account() {
    let app = TestApp::new().await;
    app.create_user("alice").await;
    app.create_user("bob").await;

    for _ in 0..3 {
        app.try_login("alice", "wrong-password").await;
    }

    let response = app.try_login("bob", PASSWORD).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_login_never_locks() {
    let app = TestApp::new().await;

    for _ in 0..5 {
        let response = app.try_login("ghost", "wrong-password").await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_missing_bearer_token() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/user/login_history", None, None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "Please authenticate.");
}

#[tokio::test]
async fn test_garbage_bearer_token() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/user/login_history", None, Some("not.a.jwt"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "Please authenticate.");
}

#[tokio::test]
async fn test_token_from_other_secret_rejected() {
    let issuer = TestApp::new().await;
    issuer.create_user("alice").await;
    let token = issuer.login("alice", PASSWORD).await;

    let mut config = gatekeep_core::config::AppConfig::default();
    config.auth.jwt_secret = "a-different-signing-secret".to_string();
    let verifier = TestApp::with_config(config).await;

    let response = verifier
        .request("GET", "/api/user/login_history", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
