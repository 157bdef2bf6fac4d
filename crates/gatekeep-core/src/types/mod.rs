//! Core type definitions used across the Gatekeep workspace.

pub mod id;
pub mod pagination;

pub use id::AccountId;
pub use pagination::{PageRequest, PageResponse};
