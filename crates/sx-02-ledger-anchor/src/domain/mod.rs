//! Domain layer for ledger anchoring.

pub mod errors;
pub mod identity;
pub mod types;

pub use errors::*;
pub use identity::*;
pub use types::*;
