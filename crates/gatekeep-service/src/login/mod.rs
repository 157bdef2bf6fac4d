//! Login and login-history use cases.

pub mod history;
pub mod service;

pub use history::{HistoryEntry, HistoryPage, HistoryService};
pub use service::{LoginGrant, LoginOutcome, LoginRequest, LoginService};
