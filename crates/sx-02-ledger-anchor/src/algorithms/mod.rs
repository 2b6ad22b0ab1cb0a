//! Transaction construction.

pub mod message;

pub use message::*;
