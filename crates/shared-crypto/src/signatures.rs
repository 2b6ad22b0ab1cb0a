//! # Ed25519 Signatures
//!
//! Twisted Edwards curve signatures with deterministic nonces. The ledger
//! authority signs every anchoring transaction with one of these keys.
//!
//! ## Key Encoding
//!
//! Keypairs travel as 64 bytes: the 32-byte secret seed followed by the
//! 32-byte public key. Loading verifies that both halves belong together.

use crate::{Address, CryptoError};
use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use std::fmt;
use zeroize::Zeroizing;

/// Compressed Edwards point; doubles as the account address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ed25519PublicKey([u8; 32]);

impl Ed25519PublicKey {
    /// Rejects bytes that do not decompress to a curve point.
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        match VerifyingKey::from_bytes(&bytes) {
            Ok(_) => Ok(Self(bytes)),
            Err(_) => Err(CryptoError::InvalidPublicKey),
        }
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Ledger address derived from this key.
    pub fn to_address(&self) -> Address {
        Address::new(self.0)
    }

    /// Check `signature` over `message` (e.g. a serialized transaction message).
    pub fn verify(&self, message: &[u8], signature: &Ed25519Signature) -> Result<(), CryptoError> {
        let key = VerifyingKey::from_bytes(&self.0).map_err(|_| CryptoError::InvalidPublicKey)?;
        key.verify(message, &ed25519_dalek::Signature::from_bytes(&signature.0))
            .map_err(|_| CryptoError::SignatureVerificationFailed)
    }
}

/// A 64-byte transaction signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ed25519Signature([u8; 64]);

impl Ed25519Signature {
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Create from a slice, checking the length.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let array: [u8; 64] = bytes.try_into().map_err(|_| CryptoError::InvalidKeyLength {
            expected: 64,
            actual: bytes.len(),
        })?;
        Ok(Self(array))
    }

    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

/// Ledger signatures are shown in base58, which is also how transactions
/// are identified by the network.
impl fmt::Display for Ed25519Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

/// Signing authority keypair. The secret is wiped on drop.
pub struct Ed25519KeyPair {
    secret: SigningKey,
}

impl Ed25519KeyPair {
    /// Fresh keypair from the OS-seeded thread RNG.
    pub fn generate() -> Self {
        Self {
            secret: SigningKey::generate(&mut rand::thread_rng()),
        }
    }

    /// Deterministic keypair from a 32-byte seed.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            secret: SigningKey::from_bytes(&seed),
        }
    }

    /// Create from the 64-byte `secret || public` encoding.
    pub fn from_keypair_bytes(bytes: &[u8; 64]) -> Result<Self, CryptoError> {
        SigningKey::from_keypair_bytes(bytes)
            .map(|secret| Self { secret })
            .map_err(|_| CryptoError::MismatchedKeypair)
    }

    /// Create from an arbitrary slice that must hold exactly 64 keypair bytes.
    pub fn from_keypair_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let array: Zeroizing<[u8; 64]> =
            Zeroizing::new(bytes.try_into().map_err(|_| CryptoError::InvalidKeyLength {
                expected: 64,
                actual: bytes.len(),
            })?);
        Self::from_keypair_bytes(&array)
    }

    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.secret.verifying_key().to_bytes())
    }

    /// Ledger address of the public key.
    pub fn address(&self) -> Address {
        self.public_key().to_address()
    }

    /// RFC 8032 signature; the same key and message always give the same bytes.
    pub fn sign(&self, message: &[u8]) -> Ed25519Signature {
        Ed25519Signature(self.secret.sign(message).to_bytes())
    }

    /// Export the 64-byte `secret || public` encoding.
    pub fn to_keypair_bytes(&self) -> Zeroizing<[u8; 64]> {
        Zeroizing::new(self.secret.to_keypair_bytes())
    }
}

impl fmt::Debug for Ed25519KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ed25519KeyPair")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}
