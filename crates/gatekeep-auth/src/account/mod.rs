//! Account storage used by the guard and the account service.

pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::MemoryAccountStore;
pub use store::AccountStore;
