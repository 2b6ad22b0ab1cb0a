//! Ports layer for the Score Records subsystem.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
