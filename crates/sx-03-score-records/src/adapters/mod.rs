//! Storage adapters.

pub mod file;
pub mod memory;

pub use file::{load_engineers, FileScoreRepository};
pub use memory::{InMemoryEngineerDirectory, InMemoryScoreRepository};
