//! Account domain entities.

pub mod model;
pub mod update;

pub use model::{Account, AccountChanges, AccountProfile, CreateAccount};
pub use update::UpdatableField;
