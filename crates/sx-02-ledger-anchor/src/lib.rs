//! # SX-02 Ledger Anchor
//!
//! Anchors attestation payloads on the ledger as memo transactions.
//!
//! **Subsystem ID:** 02  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Anchoring Sequence
//!
//! 1. Shape-check the wallet (no network call on failure)
//! 2. Stamp `issued_at` and `issuer` on the working copy of the payload
//! 3. Canonical bytes → `score_hash` (SHA-256, lowercase hex)
//! 4. One memo instruction, one read-only signer account, data = bytes
//! 5. Sign, submit (preflight on, `confirmed`, node retries = 3)
//! 6. Reject an empty signature; optionally poll until confirmed
//!
//! ## Signing Identity
//!
//! | Source | Shape |
//! |--------|-------|
//! | Key file | JSON array of 64 bytes |
//! | Inline secret | JSON array of 64 bytes, or base58 string |
//! | Fallback | Ephemeral keypair, warned about at startup |
//!
//! ## Module Structure
//!
//! ```text
//! sx-02-ledger-anchor/
//! ├── domain/          # SigningIdentity, wire types, errors
//! ├── algorithms/      # Message compilation, transaction signing
//! ├── ports/           # AttestationAnchor (in), LedgerRpc (out)
//! ├── adapters/        # JSON-RPC over HTTP
//! ├── config.rs        # LedgerConfig::from_env
//! └── service.rs       # LedgerAnchor
//! ```

#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::JsonRpcLedgerClient;
pub use algorithms::{memo_instruction, Message, Transaction, PACKET_DATA_SIZE};
pub use config::{ConfigError, ConfirmationConfig, IdentityConfig, LedgerConfig};
pub use domain::{
    validate_wallet, AnchorError, Blockhash, Commitment, IdentityError, IdentitySource,
    LedgerAnchorResult, RpcError, SendOptions, SignatureStatus, SigningIdentity,
    MEMO_PROGRAM_ID, MIN_WALLET_LENGTH,
};
pub use ports::{AttestationAnchor, LedgerRpc, MockLedgerRpc, MockSubmit};
pub use service::LedgerAnchor;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
