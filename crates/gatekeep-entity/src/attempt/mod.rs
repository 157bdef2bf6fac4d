//! Login attempt history entities.

pub mod model;
pub mod outcome;

pub use model::{AttemptRecord, NewAttempt};
pub use outcome::AttemptOutcome;
