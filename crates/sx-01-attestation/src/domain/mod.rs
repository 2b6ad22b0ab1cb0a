//! Domain layer for attestation payloads.

pub mod payload;
pub mod value;

pub use payload::*;
pub use value::*;
