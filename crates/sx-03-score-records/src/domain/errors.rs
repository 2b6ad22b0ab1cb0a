//! # Error Types

use shared_types::ObjectId;
use sx_02_ledger_anchor::AnchorError;
use thiserror::Error;

/// Backing store failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Filesystem failure.
    #[error("Store I/O error: {0}")]
    Io(String),

    /// A record could not be encoded or decoded.
    #[error("Store serialization error: {0}")]
    Serialization(String),

    /// A stored line is not a valid document.
    #[error("Corrupt store entry at line {line}: {reason}")]
    Corrupt { line: usize, reason: String },

    /// Records are append-only; ids are never reused.
    #[error("Record {0} already exists")]
    DuplicateId(ObjectId),
}

/// Transport-independent error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Upstream,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation_error",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Upstream => "upstream_error",
            ErrorKind::Internal => "internal_error",
        }
    }

    /// Label for `sx_score_publications_total`.
    pub fn outcome_label(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Upstream => "upstream",
            ErrorKind::Internal => "internal",
        }
    }
}

/// Errors returned by the score record service.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScoreServiceError {
    /// Malformed request; nothing external was touched.
    #[error("{0}")]
    Validation(String),

    /// Referenced engineer does not exist; no anchor was attempted.
    #[error("Engineer {0} not found")]
    EngineerNotFound(ObjectId),

    /// Ledger anchoring failed; nothing was persisted.
    #[error("Failed to record score on ledger: {0}")]
    Upstream(AnchorError),

    /// Store failure.
    #[error("Score store failure: {0}")]
    Store(#[from] StoreError),
}

impl ScoreServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScoreServiceError::Validation(_) => ErrorKind::Validation,
            ScoreServiceError::EngineerNotFound(_) => ErrorKind::NotFound,
            ScoreServiceError::Upstream(_) => ErrorKind::Upstream,
            ScoreServiceError::Store(_) => ErrorKind::Internal,
        }
    }
}

impl From<AnchorError> for ScoreServiceError {
    /// Wallet shape errors are the caller's fault; everything else is upstream.
    fn from(error: AnchorError) -> Self {
        match error {
            AnchorError::InvalidWallet(reason) => ScoreServiceError::Validation(reason),
            other => ScoreServiceError::Upstream(other),
        }
    }
}
