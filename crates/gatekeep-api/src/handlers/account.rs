//! Account handlers: create, update, delete.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{Map, Value};

use gatekeep_service::AccountUpdated;

use crate::dto::request::CreateAccountRequest;
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::AuthAccount;
use crate::state::AppState;

/// POST /api/user/create_account
pub async fn create_account(
    State(state): State<AppState>,
    Json(req): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    state.account_service.create_account(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("user has been created successfully")),
    ))
}

/// PUT /api/user/update_account
pub async fn update_account(
    State(state): State<AppState>,
    auth: AuthAccount,
    Json(body): Json<Map<String, Value>>,
) -> Result<Json<AccountUpdated>, ApiError> {
    let updated = state
        .account_service
        .update_account(auth.context(), body)
        .await?;
    Ok(Json(updated))
}

/// DELETE /api/user/delete_account
pub async fn delete_account(
    State(state): State<AppState>,
    auth: AuthAccount,
) -> Result<Json<MessageResponse>, ApiError> {
    state.account_service.delete_account(auth.context()).await?;
    Ok(Json(MessageResponse::new(
        "Your account has been deleted successfully.",
    )))
}
