//! Access token issuance and validation.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::Claims;
pub use decoder::JwtDecoder;
pub use encoder::{AccessToken, JwtEncoder};
