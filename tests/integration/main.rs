//! Integration tests for the Gatekeep HTTP API.
//!
//! Every test builds the full router over in-memory stores and a manual
//! clock, so lockout windows can be crossed without sleeping.

mod account_test;
mod auth_test;
mod helpers;
