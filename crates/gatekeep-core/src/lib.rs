//! # gatekeep-core
//!
//! Core crate for Gatekeep. Contains configuration schemas, typed
//! identifiers, pagination types, the wall clock abstraction, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other Gatekeep crates.

pub mod clock;
pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::AppError;
pub use result::AppResult;
