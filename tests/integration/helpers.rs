//! Shared test helpers for integration tests.

use std::sync::Arc;

use argon2::Params;
use axum::Router;
use axum::body::Body;
use chrono::DateTime;
use http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use gatekeep_api::{AppState, Backends, build_app};
use gatekeep_auth::PasswordHasher;
use gatekeep_core::ManualClock;
use gatekeep_core::config::AppConfig;

/// Default password used by [`TestApp::create_user`].
pub const PASSWORD: &str = "correct-horse-battery";

/// Test application wrapper holding the router and the clock it reads.
pub struct TestApp {
    /// The Axum router
    pub router: Router,
    /// Clock shared with the attempt ledger
    pub clock: ManualClock,
    /// Shared state, for reaching past the HTTP surface
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application with default configuration.
    pub async fn new() -> Self {
        Self::with_config(AppConfig::default()).await
    }

    /// Create a test application from an explicit configuration.
    pub async fn with_config(config: AppConfig) -> Self {
        let start = DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp");
        let clock = ManualClock::new(start);

        // Minimal Argon2 cost keeps the suite fast.
        let params = Params::new(1024, 1, 1, None).expect("valid argon2 params");
        let hasher = PasswordHasher::with_params(params);

        let state = AppState::new(
            config,
            Backends::memory(),
            Arc::new(clock.clone()),
            hasher,
        );
        let router = build_app(state.clone());

        Self {
            router,
            clock,
            state,
        }
    }

    /// Register an account with [`PASSWORD`], asserting success.
    pub async fn create_user(&self, login: &str) {
        let response = self
            .request(
                "POST",
                "/api/user/create_account",
                Some(json!({
                    "name": format!("{login} tester"),
                    "email": format!("{login}@test.com"),
                    "login": login,
                    "password": PASSWORD,
                    "dob": "1990-04-01",
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Create failed: {:?}",
            response.body
        );
    }

    /// Attempt a login and return the raw response.
    pub async fn try_login(&self, login: &str, password: &str) -> TestResponse {
        let body = json!({
            "login": login,
            "password": password,
        });
        self.request("POST", "/api/user/login", Some(body), None)
            .await
    }

    /// Login and return the access token.
    pub async fn login(&self, login: &str, password: &str) -> String {
        let response = self.try_login(login, password).await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response
            .body
            .get("access_token")
            .and_then(|v| v.as_str())
            .expect("No access_token in login response")
            .to_string()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let retry_after = response
            .headers()
            .get(http::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            retry_after,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed `Retry-After` header, when present
    pub retry_after: Option<u64>,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `message` field of the body.
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}
