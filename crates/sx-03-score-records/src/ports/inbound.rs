//! # Inbound Ports
//!
//! What the Score Records subsystem offers to the API gateway.

use crate::domain::{ScoreInput, ScoreServiceError};
use async_trait::async_trait;
use shared_crypto::Address;
use shared_types::ScoreRecord;

/// Score records API - inbound port.
#[async_trait]
pub trait ScoreRecordApi: Send + Sync {
    /// Anchor and persist a new score snapshot for `engineer_id`.
    async fn publish(
        &self,
        engineer_id: &str,
        input: ScoreInput,
    ) -> Result<ScoreRecord, ScoreServiceError>;

    /// Up to `limit` records (default 10, range 1..=100), newest first.
    async fn list(
        &self,
        engineer_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<ScoreRecord>, ScoreServiceError>;

    /// Newest record, or `None` when the engineer has none.
    async fn latest(&self, engineer_id: &str) -> Result<Option<ScoreRecord>, ScoreServiceError>;

    /// Issuer address stamped on every attestation.
    fn issuer(&self) -> Address;
}
