//! Account lifecycle, history, and health integration tests.

use http::StatusCode;
use serde_json::json;

use crate::helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_create_account() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/user/create_account",
            Some(json!({
                "name": "Carol",
                "email": "carol@test.com",
                "login": "carol",
                "password": PASSWORD,
                "dob": "1985-07-14",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.message(), "user has been created successfully");
}

#[tokio::test]
async fn test_create_account_duplicate_login() {
    let app = TestApp::new().await;
    app.create_user("carol").await;

    let response = app
        .request(
            "POST",
            "/api/user/create_account",
            Some(json!({
                "name": "Another Carol",
                "email": "elsewhere@test.com",
                "login": "carol",
                "password": PASSWORD,
                "dob": "1985-07-14",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Email or login already used");
}

#[tokio::test]
async fn test_create_account_missing_fields() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/user/create_account",
            Some(json!({ "name": "Carol", "login": "carol" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.message(),
        "Please provide name, email, login, dob password"
    );
}

#[tokio::test]
async fn test_create_account_invalid_email() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/user/create_account",
            Some(json!({
                "name": "Carol",
                "email": "not-an-email",
                "login": "carol",
                "password": PASSWORD,
                "dob": "1985-07-14",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Invalid Email");
}

#[tokio::test]
async fn test_update_account_profile() {
    let app = TestApp::new().await;
    app.create_user("dave").await;
    let token = app.login("dave", PASSWORD).await;

    let response = app
        .request(
            "PUT",
            "/api/user/update_account",
            Some(json!({ "name": "David", "dob": "1991-02-03" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.message(),
        "Your credentials have been updated successfully."
    );
    assert_eq!(response.body["user"]["name"], "David");
    assert_eq!(response.body["user"]["dob"], "1991-02-03");
    assert_eq!(response.body["user"]["email"], "dave@test.com");
}

#[tokio::test]
async fn test_update_account_rejects_login_change() {
    let app = TestApp::new().await;
    app.create_user("dave").await;
    let token = app.login("dave", PASSWORD).await;

    let response = app
        .request(
            "PUT",
            "/api/user/update_account",
            Some(json!({ "login": "root" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.message(),
        "You are trying to update data you are not allowed to"
    );
}

#[tokio::test]
async fn test_update_account_email_taken() {
    let app = TestApp::new().await;
    app.create_user("dave").await;
    app.create_user("erin").await;
    let token = app.login("dave", PASSWORD).await;

    let response = app
        .request(
            "PUT",
            "/api/user/update_account",
            Some(json!({ "email": "erin@test.com" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Email already used");
}

#[tokio::test]
async fn test_update_password_then_login() {
    let app = TestApp::new().await;
    app.create_user("dave").await;
    let token = app.login("dave", PASSWORD).await;

    let response = app
        .request(
            "PUT",
            "/api/user/update_account",
            Some(json!({ "password": "new-secret-phrase", "oldPassword": PASSWORD })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.try_login("dave", PASSWORD).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    app.login("dave", "new-secret-phrase").await;
}

#[tokio::test]
async fn test_delete_account() {
    let app = TestApp::new().await;
    app.create_user("frank").await;
    let token = app.login("frank", PASSWORD).await;

    let response = app
        .request("DELETE", "/api/user/delete_account", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.message(),
        "Your account has been deleted successfully."
    );

    let response = app.try_login("frank", PASSWORD).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("DELETE", "/api/user/delete_account", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_login_history_pagination() {
    let app = TestApp::new().await;
    app.create_user("gina").await;

    let mut token = String::new();
    for _ in 0..12 {
        token = app.login("gina", PASSWORD).await;
        app.clock.advance_secs(1);
    }
    app.try_login("gina", "wrong-password").await;

    let response = app
        .request("GET", "/api/user/login_history", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["count"], 2);

    let history = response.body["history"].as_array().expect("history array");
    assert_eq!(history.len(), 10);
    assert_eq!(history[0]["success"], false);
    assert_eq!(history[1]["success"], true);

    let response = app
        .request("GET", "/api/user/login_history?page=2", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let history = response.body["history"].as_array().expect("history array");
    assert_eq!(history.len(), 3);
}

#[tokio::test]
async fn test_login_history_huge_page_is_empty() {
    let app = TestApp::new().await;
    app.create_user("ivan").await;
    let token = app.login("ivan", PASSWORD).await;

    let response = app
        .request(
            "GET",
            "/api/user/login_history?page=18446744073709551615",
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let history = response.body["history"].as_array().expect("history array");
    assert!(history.is_empty());
    assert_eq!(response.body["count"], 1);
}

#[tokio::test]
async fn test_retention_spares_recent_attempts() {
    let app = TestApp::new().await;
    app.create_user("hank").await;

    for _ in 0..5 {
        app.login("hank", PASSWORD).await;
        app.clock.advance_secs(1);
    }
    app.clock.advance(chrono::Duration::days(31));

    let removed = app.state.retention.run_once().await.expect("prune");
    assert_eq!(removed, 2);

    let token = app.login("hank", PASSWORD).await;
    let response = app
        .request("GET", "/api/user/login_history", None, Some(&token))
        .await;
    let history = response.body["history"].as_array().expect("history array");
    assert_eq!(history.len(), 4);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["storage"], "memory");
}
