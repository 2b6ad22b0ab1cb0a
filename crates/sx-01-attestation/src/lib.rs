//! # SX-01 Attestation Payloads
//!
//! Builds the soulbound attestation payload for a score snapshot and turns it
//! into the exact bytes that get hashed and anchored.
//!
//! **Subsystem ID:** 01  
//! **Architecture:** Hexagonal (domain + pure algorithms, no I/O)
//!
//! ## Pipeline
//!
//! ```text
//! Engineer + ScoreSnapshot
//!     │  PayloadBuilder::build          (typed allow-list projections)
//!     ▼
//! SoulboundPayload ── stamp(issuer, issued_at)
//!     │  ToPayloadValue                 (closed variant tree)
//!     ▼
//! PayloadValue
//!     │  canonicalize                   (JSON-safe primitives)
//!     ▼
//! serde_json::Value
//!     │  encode_canonical               (sorted keys, no whitespace, ASCII)
//!     ▼
//! canonical bytes ── SHA-256 ──▶ score_hash (64 lowercase hex)
//! ```
//!
//! ## Guarantees
//!
//! | Property | Mechanism |
//! |----------|-----------|
//! | Key-order insensitivity | Encoder sorts object keys itself |
//! | No self-reference | Projections cannot hold hash, signature or record id |
//! | History exclusion | Profile projection has no history fields |
//!
//! ## Module Structure
//!
//! ```text
//! sx-01-attestation/
//! ├── domain/          # PayloadValue, projections, SoulboundPayload
//! ├── algorithms/      # canonicalize, canonical JSON encoding, hashing
//! └── builder.rs       # PayloadBuilder
//! ```

#![warn(clippy::all)]

pub mod algorithms;
pub mod builder;
pub mod domain;

// Re-exports
pub use algorithms::{canonical_bytes, canonicalize, digest, encode_canonical, CanonicalDigest};
pub use builder::PayloadBuilder;
pub use domain::{
    EngineerProfile, Identifier, PayloadValue, Scalar, SchemaRef, ScoreProjection,
    SoulboundPayload, Timestamp, ToPayloadValue, NON_TRANSFERABLE, SCHEMA_ID, SCHEMA_VERSION,
    TOKEN_PROGRAM,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
