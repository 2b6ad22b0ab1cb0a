//! # Shared Types Crate
//!
//! This crate contains the domain entities that flow between the attestation,
//! ledger-anchor and score-record subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Lifecycle as Types**: a score moves `ScoreDraft` → `ScoreSnapshot` →
//!   `ScoreRecord`; only the last carries a hash and a ledger signature, and
//!   it always carries both.
//! - **Injectable Time**: every timestamp comes from a [`Clock`].

pub mod entities;
pub mod errors;
pub mod object_id;
pub mod time;

pub use entities::*;
pub use errors::*;
pub use object_id::ObjectId;
pub use time::{Clock, ManualClock, SystemClock};
