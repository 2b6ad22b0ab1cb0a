//! # Error Types
//!
//! Defines error types used across subsystems.

use thiserror::Error;

/// Errors raised while parsing an object identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObjectIdError {
    /// Identifier does not have exactly 24 characters.
    #[error("Invalid object id length: expected 24 hex characters, got {0}")]
    InvalidLength(usize),

    /// Identifier contains a non-hexadecimal character.
    #[error("Invalid object id: {0:?} is not hexadecimal")]
    InvalidHex(String),
}

/// Errors raised while validating a caller-supplied score draft.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DraftError {
    /// A score field is NaN or infinite.
    #[error("Score field {field} must be a finite number")]
    NonFiniteScore { field: &'static str },
}
