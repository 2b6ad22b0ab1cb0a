//! # Outbound Ports
//!
//! The ledger node, as seen by the anchor.

use crate::algorithms::decode_length;
use crate::domain::{Blockhash, Commitment, RpcError, SendOptions, SignatureStatus};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Ledger node client - outbound port.
#[async_trait]
pub trait LedgerRpc: Send + Sync {
    /// Most recent blockhash at `commitment`.
    async fn latest_blockhash(&self, commitment: Commitment) -> Result<Blockhash, RpcError>;

    /// Submit a serialized, signed transaction; returns its signature.
    async fn send_transaction(
        &self,
        wire: &[u8],
        options: &SendOptions,
    ) -> Result<String, RpcError>;

    /// Status of a previously submitted transaction, if the node knows it.
    async fn signature_status(&self, signature: &str)
        -> Result<Option<SignatureStatus>, RpcError>;
}

// =============================================================================
// Mock Implementation for Testing
// =============================================================================

/// How the mock answers `send_transaction`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockSubmit {
    /// Return the transaction's own first signature (base58).
    Accept,
    /// Return an empty string.
    EmptySignature,
    /// Fail with a node error.
    Reject(String),
}

/// A transaction captured by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedTransaction {
    pub wire: Vec<u8>,
    pub options: SendOptions,
}

/// In-memory ledger node for tests.
#[derive(Debug)]
pub struct MockLedgerRpc {
    submit: Mutex<MockSubmit>,
    /// Status reported for every signature; `None` means unknown.
    status: Mutex<Option<SignatureStatus>>,
    blockhash: Blockhash,
    submissions: Mutex<Vec<SubmittedTransaction>>,
    calls: AtomicUsize,
}

impl Default for MockLedgerRpc {
    fn default() -> Self {
        Self::new(MockSubmit::Accept)
    }
}

impl MockLedgerRpc {
    /// Mock that confirms everything it accepts.
    pub fn new(submit: MockSubmit) -> Self {
        Self {
            submit: Mutex::new(submit),
            status: Mutex::new(Some(SignatureStatus {
                slot: 1,
                confirmations: Some(1),
                err: None,
                confirmation_status: Some(Commitment::Confirmed),
            })),
            blockhash: Blockhash([0x11; 32]),
            submissions: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn set_submit(&self, submit: MockSubmit) {
        *self.submit.lock() = submit;
    }

    pub fn set_status(&self, status: Option<SignatureStatus>) {
        *self.status.lock() = status;
    }

    pub fn blockhash(&self) -> Blockhash {
        self.blockhash
    }

    /// Everything passed to `send_transaction`, in order.
    pub fn submissions(&self) -> Vec<SubmittedTransaction> {
        self.submissions.lock().clone()
    }

    /// Total RPC calls of any kind.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LedgerRpc for MockLedgerRpc {
    async fn latest_blockhash(&self, _commitment: Commitment) -> Result<Blockhash, RpcError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.blockhash)
    }

    async fn send_transaction(
        &self,
        wire: &[u8],
        options: &SendOptions,
    ) -> Result<String, RpcError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.submissions.lock().push(SubmittedTransaction {
            wire: wire.to_vec(),
            options: *options,
        });

        match self.submit.lock().clone() {
            MockSubmit::Accept => {
                let offset = decode_length(wire).map(|(_, used)| used).unwrap_or(1);
                let signature = wire
                    .get(offset..offset + 64)
                    .ok_or_else(|| RpcError::Decode("transaction has no signature".into()))?;
                Ok(bs58::encode(signature).into_string())
            }
            MockSubmit::EmptySignature => Ok(String::new()),
            MockSubmit::Reject(message) => Err(RpcError::Node {
                code: -32002,
                message,
            }),
        }
    }

    async fn signature_status(
        &self,
        _signature: &str,
    ) -> Result<Option<SignatureStatus>, RpcError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.status.lock().clone())
    }
}
