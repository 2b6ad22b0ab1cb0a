//! Cross-subsystem integration tests, driven through the HTTP router.

pub mod persistence;
pub mod scenarios;
pub mod wire;
