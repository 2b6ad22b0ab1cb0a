//! Ports layer for the Ledger Anchor subsystem.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
