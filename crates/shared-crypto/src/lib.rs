//! # Shared Crypto - Authority Key and Digest Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-256 | Score content hashes |
//! | `signatures` | Ed25519 | Ledger transaction signing |
//! | `address` | base58 | Public account / program addresses |
//!
//! ## Security Properties
//!
//! - **Ed25519**: Deterministic nonces, no RNG dependency when signing
//! - **Secret material**: keypair bytes are wiped on drop
//! - **SHA-256**: lowercase hex rendering, always 64 characters

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod address;
pub mod errors;
pub mod hashing;
pub mod signatures;

// Re-exports
pub use address::Address;
pub use errors::CryptoError;
pub use hashing::{sha256, sha256_hex, Hash};
pub use signatures::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
