//! # SX-03 Score Records
//!
//! Publishes engineer score snapshots: validates the request, anchors the
//! attestation payload on the ledger, then persists the anchored record.
//!
//! **Subsystem ID:** 03
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Snapshot Lifecycle
//!
//! ```text
//! Draft ──[engineer exists]──→ PendingAnchor ──[anchor ok]──→ Anchored
//!                                    │
//!                                    └──[anchor failed]──→ (nothing stored)
//! ```
//!
//! Records are append-only: no update, no delete. A new assessment is always
//! a new record.
//!
//! ## Error Kinds
//!
//! | Kind | Cause | HTTP |
//! |------|-------|------|
//! | `Validation` | Malformed id, non-finite score, bad wallet, bad limit | 400 |
//! | `NotFound` | Engineer does not exist | 404 |
//! | `Upstream` | Ledger anchoring failed | 502 |
//! | `Internal` | Store failure | 500 |
//!
//! ## Known Limitation
//!
//! The ledger write and the local insert are two steps. If the process dies
//! (or the insert fails) after the transaction lands, the ledger holds an
//! attestation with no local record. Nothing reconciles this.
//!
//! ## Module Structure
//!
//! ```text
//! sx-03-score-records/
//! ├── domain/          # ScoreInput, limits, errors
//! ├── ports/           # ScoreRecordApi (in), EngineerDirectory + ScoreRepository (out)
//! ├── adapters/        # In-memory and JSON-lines stores
//! └── service.rs       # ScoreRecordService
//! ```

#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{FileScoreRepository, InMemoryEngineerDirectory, InMemoryScoreRepository};
pub use domain::{
    resolve_limit, ErrorKind, ScoreInput, ScoreServiceError, StoreError, DEFAULT_LIST_LIMIT,
    MAX_LIST_LIMIT,
};
pub use ports::{EngineerDirectory, ScoreRecordApi, ScoreRepository};
pub use service::ScoreRecordService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
