//! # Ledger Anchor Service
//!
//! Implements [`AttestationAnchor`] on top of a [`LedgerRpc`] node client.

use crate::algorithms::{memo_instruction, Message, Transaction, PACKET_DATA_SIZE};
use crate::config::ConfirmationConfig;
use crate::domain::{
    validate_wallet, AnchorError, Commitment, LedgerAnchorResult, SendOptions, SigningIdentity,
};
use crate::ports::{AttestationAnchor, LedgerRpc};
use async_trait::async_trait;
use shared_crypto::Address;
use shared_types::Clock;
use std::sync::Arc;
use stirixi_telemetry::{HistogramTimer, ANCHOR_DURATION, ANCHOR_SUBMISSIONS};
use sx_01_attestation::{digest, SoulboundPayload};
use tracing::{debug, info, warn};

/// Writes attestation payloads to the ledger as memo transactions.
///
/// Holds no per-request state; one instance serves all requests.
pub struct LedgerAnchor {
    rpc: Arc<dyn LedgerRpc>,
    identity: Arc<SigningIdentity>,
    clock: Arc<dyn Clock>,
    options: SendOptions,
    confirmation: ConfirmationConfig,
}

impl LedgerAnchor {
    pub fn new(
        rpc: Arc<dyn LedgerRpc>,
        identity: Arc<SigningIdentity>,
        clock: Arc<dyn Clock>,
        confirmation: ConfirmationConfig,
    ) -> Self {
        Self {
            rpc,
            identity,
            clock,
            options: SendOptions::ANCHOR,
            confirmation,
        }
    }

    pub fn identity(&self) -> &SigningIdentity {
        &self.identity
    }

    async fn submit(
        &self,
        wallet: &str,
        mut payload: SoulboundPayload,
    ) -> Result<LedgerAnchorResult, AnchorError> {
        validate_wallet(wallet)?;

        let issuer = self.identity.address();
        payload.stamp(issuer, self.clock.now());
        let digest = digest(&payload);
        debug!(
            score_hash = %digest.score_hash,
            bytes = digest.bytes.len(),
            "[sx-02] Canonical payload hashed"
        );

        let blockhash = self.rpc.latest_blockhash(Commitment::Confirmed).await?;
        let instruction = memo_instruction(issuer, digest.bytes);
        let message = Message::new(&[instruction], issuer, blockhash);
        let transaction = Transaction::sign(message, &self.identity);
        let wire = transaction.serialize();
        if wire.len() > PACKET_DATA_SIZE {
            return Err(AnchorError::TransactionTooLarge {
                size: wire.len(),
                limit: PACKET_DATA_SIZE,
            });
        }

        let signature = self.rpc.send_transaction(&wire, &self.options).await?;
        if signature.trim().is_empty() {
            return Err(AnchorError::EmptySignature);
        }

        if self.confirmation.enabled {
            self.await_confirmation(&signature).await?;
        }

        Ok(LedgerAnchorResult {
            signature,
            score_hash: digest.score_hash,
        })
    }

    /// Poll until the transaction reaches `confirmed`, fails, or the poll
    /// budget runs out. Status lookup errors count as an unanswered poll.
    async fn await_confirmation(&self, signature: &str) -> Result<(), AnchorError> {
        for poll in 1..=self.confirmation.max_polls {
            match self.rpc.signature_status(signature).await {
                Ok(Some(status)) if status.err.is_some() => {
                    let reason = status
                        .err
                        .map(|e| e.to_string())
                        .unwrap_or_default();
                    return Err(AnchorError::TransactionFailed {
                        signature: signature.to_string(),
                        reason,
                    });
                }
                Ok(Some(status)) if status.satisfies(Commitment::Confirmed) => {
                    debug!(signature, poll, slot = status.slot, "[sx-02] Transaction confirmed");
                    return Ok(());
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(signature, poll, error = %e, "[sx-02] Signature status lookup failed");
                }
            }
            if poll < self.confirmation.max_polls {
                tokio::time::sleep(self.confirmation.poll_interval).await;
            }
        }

        Err(AnchorError::ConfirmationTimeout {
            signature: signature.to_string(),
            polls: self.confirmation.max_polls,
        })
    }
}

#[async_trait]
impl AttestationAnchor for LedgerAnchor {
    fn issuer(&self) -> Address {
        self.identity.address()
    }

    async fn anchor(
        &self,
        wallet: &str,
        payload: SoulboundPayload,
    ) -> Result<LedgerAnchorResult, AnchorError> {
        let _timer = HistogramTimer::new(&ANCHOR_DURATION);

        match self.submit(wallet, payload).await {
            Ok(result) => {
                ANCHOR_SUBMISSIONS.with_label_values(&["confirmed"]).inc();
                info!(
                    signature = %result.signature,
                    score_hash = %result.score_hash,
                    "[sx-02] Attestation anchored"
                );
                Ok(result)
            }
            Err(e) => {
                ANCHOR_SUBMISSIONS.with_label_values(&[e.outcome_label()]).inc();
                if e.is_validation() {
                    debug!(error = %e, "[sx-02] Anchor rejected before submission");
                } else {
                    warn!(error = %e, "[sx-02] Anchor failed");
                }
                Err(e)
            }
        }
    }
}
