//! # Content Hashing
//!
//! `score_hash = hex(SHA-256(encode_canonical(canonicalize(payload))))`

use super::{canonicalize, encode_canonical};
use crate::domain::ToPayloadValue;
use shared_crypto::sha256_hex;

/// Canonical bytes of a payload together with their hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalDigest {
    /// Exact bytes that were hashed; these become the memo data.
    pub bytes: Vec<u8>,
    /// Lowercase hex SHA-256 of `bytes`.
    pub score_hash: String,
}

/// Canonical byte encoding of anything attestable.
pub fn canonical_bytes<T: ToPayloadValue + ?Sized>(item: &T) -> Vec<u8> {
    encode_canonical(&canonicalize(&item.to_payload_value()))
}

/// Canonical bytes plus their SHA-256.
pub fn digest<T: ToPayloadValue + ?Sized>(item: &T) -> CanonicalDigest {
    let bytes = canonical_bytes(item);
    let score_hash = sha256_hex(&bytes);
    CanonicalDigest { bytes, score_hash }
}
