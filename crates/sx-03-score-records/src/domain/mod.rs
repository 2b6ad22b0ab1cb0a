//! Domain layer for score records.

pub mod errors;
pub mod input;
pub mod query;

pub use errors::*;
pub use input::*;
pub use query::*;
