//! # Error Types
//!
//! - [`IdentityError`]: fatal at startup, never raised per request
//! - [`RpcError`]: transport and node failures
//! - [`AnchorError`]: what a caller of `anchor` sees

use shared_crypto::CryptoError;
use std::path::PathBuf;
use thiserror::Error;

/// Signing identity could not be resolved.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Configured key file does not exist.
    #[error("Ledger keypair file not found: {}", .0.display())]
    KeyFileNotFound(PathBuf),

    /// Key file exists but could not be read.
    #[error("Failed to read ledger keypair file {}: {reason}", .path.display())]
    KeyFileUnreadable { path: PathBuf, reason: String },

    /// Key file content is not a 64-byte JSON array.
    #[error("Ledger keypair file {} must contain a JSON array of 64 bytes: {reason}", .path.display())]
    MalformedKeyFile { path: PathBuf, reason: String },

    /// Inline secret is neither a JSON byte array nor base58.
    #[error("Inline ledger keypair is malformed: {0}")]
    MalformedInlineSecret(String),

    /// Bytes do not form a valid keypair.
    #[error("Invalid ledger keypair: {0}")]
    InvalidKeypair(#[from] CryptoError),
}

/// Ledger RPC failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RpcError {
    /// Client could not be constructed.
    #[error("RPC client configuration error: {0}")]
    Config(String),

    /// Connection, timeout or other transport failure.
    #[error("RPC network error: {0}")]
    Network(String),

    /// Non-success HTTP status.
    #[error("RPC HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// JSON-RPC error object returned by the node.
    #[error("RPC error {code}: {message}")]
    Node { code: i64, message: String },

    /// Response could not be decoded.
    #[error("RPC decode error: {0}")]
    Decode(String),
}

/// Anchoring failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnchorError {
    /// Wallet failed the shape check; nothing was sent.
    #[error("Invalid engineer wallet: {0}")]
    InvalidWallet(String),

    /// Serialized transaction exceeds the packet limit; nothing was sent.
    #[error("Anchor transaction is {size} bytes, exceeding the {limit}-byte packet limit")]
    TransactionTooLarge { size: usize, limit: usize },

    /// Transport or node failure.
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// Submission returned no usable signature.
    #[error("Ledger returned an empty transaction signature")]
    EmptySignature,

    /// Transaction landed but failed on chain.
    #[error("Transaction {signature} failed: {reason}")]
    TransactionFailed { signature: String, reason: String },

    /// Transaction did not reach the target commitment in time.
    #[error("Transaction {signature} not confirmed after {polls} status checks")]
    ConfirmationTimeout { signature: String, polls: u32 },
}

impl AnchorError {
    /// True for caller mistakes detected before any network access.
    pub fn is_validation(&self) -> bool {
        matches!(self, AnchorError::InvalidWallet(_))
    }

    /// Metric label.
    pub fn outcome_label(&self) -> &'static str {
        match self {
            AnchorError::InvalidWallet(_) => "invalid_wallet",
            AnchorError::TransactionTooLarge { .. } => "too_large",
            AnchorError::Rpc(_) => "failed",
            AnchorError::EmptySignature => "empty_signature",
            AnchorError::TransactionFailed { .. } => "rejected",
            AnchorError::ConfirmationTimeout { .. } => "timeout",
        }
    }
}
