//! The login guard and the lockout rule it enforces.

pub mod login;
pub mod policy;
pub mod result;

pub use login::LoginGuard;
pub use policy::{LockoutPolicy, LockoutState};
pub use result::{AuthResult, DenyReason, SessionSubject};
