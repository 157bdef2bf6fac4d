//! Login and login-history handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use gatekeep_auth::DenyReason;
use gatekeep_service::{HistoryPage, LoginOutcome};

use crate::dto::request::{HistoryQuery, LoginRequest};
use crate::dto::response::{LockedResponse, LoginResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthAccount;
use crate::state::AppState;

/// POST /api/user/login
///
/// 200 with a token, 401 on a wrong credential or unknown login, 429 with
/// `Retry-After` while the account is locked.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    let response = match state.login_service.login(req).await? {
        LoginOutcome::Granted(grant) => Json(LoginResponse {
            name: grant.name,
            email: grant.email,
            dob: grant.dob,
            login: grant.login,
            access_token: grant.access_token,
        })
        .into_response(),
        LoginOutcome::Denied(DenyReason::InvalidCredential) => (
            StatusCode::UNAUTHORIZED,
            Json(MessageResponse::new("Unable to login")),
        )
            .into_response(),
        LoginOutcome::Denied(DenyReason::LockedOut { remaining_seconds }) => {
            let window = state.guard.policy().window_seconds();
            let mut response = (
                StatusCode::TOO_MANY_REQUESTS,
                Json(LockedResponse {
                    message: format!("Your account has been blocked for {}", describe(window)),
                    blocked: true,
                    time: remaining_seconds,
                }),
            )
                .into_response();
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(remaining_seconds));
            response
        }
    };

    Ok(response)
}

/// GET /api/user/login_history?page=N
pub async fn login_history(
    State(state): State<AppState>,
    auth: AuthAccount,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryPage>, ApiError> {
    let page = state
        .history_service
        .login_history(auth.context(), query.page.unwrap_or(1))
        .await?;
    Ok(Json(page))
}

fn describe(window_seconds: u64) -> String {
    match window_seconds {
        60 => "1 min".to_string(),
        s if s % 60 == 0 => format!("{} min", s / 60),
        s => format!("{s} seconds"),
    }
}
