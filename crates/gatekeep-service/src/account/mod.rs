//! Account registration, update, and deletion.

pub mod input;
pub mod service;

pub use input::{CreateAccountRequest, parse_dob};
pub use service::{AccountService, AccountUpdated};
