//! # Inbound Ports
//!
//! What the Ledger Anchor subsystem offers to its callers.

use crate::domain::{AnchorError, LedgerAnchorResult};
use async_trait::async_trait;
use shared_crypto::Address;
use sx_01_attestation::SoulboundPayload;

/// Anchoring API - inbound port.
#[async_trait]
pub trait AttestationAnchor: Send + Sync {
    /// Address stamped as `issuer` on every anchored payload.
    fn issuer(&self) -> Address;

    /// Stamp, hash, sign and submit `payload` for `wallet`.
    ///
    /// Returns only once a usable signature exists; no partial result.
    async fn anchor(
        &self,
        wallet: &str,
        payload: SoulboundPayload,
    ) -> Result<LedgerAnchorResult, AnchorError>;
}
