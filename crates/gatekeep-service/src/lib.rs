//! # gatekeep-service
//!
//! Use cases behind the account API. Each service receives its
//! collaborators as `Arc`s at construction time and exposes async methods
//! the HTTP layer calls directly.

pub mod account;
pub mod context;
pub mod login;

pub use account::{AccountService, AccountUpdated, CreateAccountRequest};
pub use context::RequestContext;
pub use login::{HistoryEntry, HistoryPage, HistoryService, LoginGrant, LoginOutcome, LoginRequest, LoginService};
