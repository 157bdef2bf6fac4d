//! # gatekeep-api
//!
//! HTTP layer for Gatekeep built on Axum. Handlers translate requests
//! into service calls and map guard verdicts and [`AppError`] kinds onto
//! status codes.
//!
//! [`AppError`]: gatekeep_core::AppError

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::{AppState, Backends};
