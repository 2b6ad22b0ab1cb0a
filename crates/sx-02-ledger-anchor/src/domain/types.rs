//! # Ledger Wire Types

use crate::domain::errors::AnchorError;
use serde::{Deserialize, Serialize};
use shared_crypto::{Address, CryptoError};
use std::fmt;
use std::str::FromStr;

/// Memo program, `MemoSq4gqABAXKb96qnH8TysNcWxMyWCqXgDLGmfcHr`.
pub const MEMO_PROGRAM_ID: Address = Address::new([
    0x05, 0x4a, 0x53, 0x5a, 0x99, 0x29, 0x21, 0x06, 0x4d, 0x24, 0xe8, 0x71, 0x60, 0xda, 0x38,
    0x7c, 0x7c, 0x35, 0xb5, 0xdd, 0xbc, 0x92, 0xbb, 0x81, 0xe4, 0x1f, 0xa8, 0x40, 0x41, 0x05,
    0x44, 0x8d,
]);

/// Shortest accepted wallet string (base58 address shape).
pub const MIN_WALLET_LENGTH: usize = 32;

/// Shape-check a wallet address string.
pub fn validate_wallet(wallet: &str) -> Result<(), AnchorError> {
    if wallet.is_empty() {
        return Err(AnchorError::InvalidWallet(
            "engineer_wallet is required".to_string(),
        ));
    }
    let length = wallet.chars().count();
    if length < MIN_WALLET_LENGTH {
        return Err(AnchorError::InvalidWallet(format!(
            "engineer_wallet must be a base58 address of at least {} characters, got {}",
            MIN_WALLET_LENGTH, length
        )));
    }
    Ok(())
}

/// Recent blockhash a transaction is bound to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Blockhash(pub [u8; 32]);

impl FromStr for Blockhash {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let address: Address = s.parse()?;
        Ok(Self(*address.as_bytes()))
    }
}

impl fmt::Display for Blockhash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for Blockhash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Blockhash({})", self)
    }
}

/// Commitment levels, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Commitment::Processed => "processed",
            Commitment::Confirmed => "confirmed",
            Commitment::Finalized => "finalized",
        }
    }
}

/// Submission options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendOptions {
    pub skip_preflight: bool,
    pub preflight_commitment: Commitment,
    /// Node-side rebroadcast budget.
    pub max_retries: u8,
}

impl SendOptions {
    /// Options every anchor submission uses.
    pub const ANCHOR: SendOptions = SendOptions {
        skip_preflight: false,
        preflight_commitment: Commitment::Confirmed,
        max_retries: 3,
    };
}

impl Default for SendOptions {
    fn default() -> Self {
        Self::ANCHOR
    }
}

/// Status of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureStatus {
    pub slot: u64,
    pub confirmations: Option<u64>,
    /// On-chain execution error, if any.
    pub err: Option<serde_json::Value>,
    pub confirmation_status: Option<Commitment>,
}

impl SignatureStatus {
    /// Whether the status has reached `target`.
    pub fn satisfies(&self, target: Commitment) -> bool {
        self.confirmation_status.is_some_and(|level| level >= target)
    }
}

/// Result of a successful anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerAnchorResult {
    /// Ledger transaction signature (base58).
    pub signature: String,
    /// SHA-256 of the anchored payload (64 lowercase hex characters).
    pub score_hash: String,
}
