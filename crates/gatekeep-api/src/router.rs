//! Route definitions for the Gatekeep HTTP API.
//!
//! Account routes live under `/api/user`; the health probe is
//! `/api/health`.

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::handlers;
use crate::state::AppState;

/// Build the Axum router and thread `AppState` through every route.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .nest("/user", user_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Account endpoints
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/create_account", post(handlers::account::create_account))
        .route("/login", post(handlers::login::login))
        .route("/login_history", get(handlers::login::login_history))
        .route("/update_account", put(handlers::account::update_account))
        .route("/delete_account", delete(handlers::account::delete_account))
}

/// Liveness and storage reachability
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
