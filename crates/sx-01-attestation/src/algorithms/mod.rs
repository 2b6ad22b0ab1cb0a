//! Pure algorithms: canonicalization, canonical encoding, hashing.

pub mod canonical;
pub mod encoding;
pub mod hashing;

pub use canonical::canonicalize;
pub use encoding::encode_canonical;
pub use hashing::{canonical_bytes, digest, CanonicalDigest};
