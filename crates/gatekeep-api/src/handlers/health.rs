//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (status, storage) = match &state.database {
        None => (StatusCode::OK, "memory"),
        Some(db) => match db.health_check().await {
            Ok(true) => (StatusCode::OK, "connected"),
            _ => (StatusCode::SERVICE_UNAVAILABLE, "unreachable"),
        },
    };

    let body = HealthResponse {
        status: if status.is_success() { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: storage.to_string(),
    };

    (status, Json(body))
}
