//! # Payload Builder
//!
//! Assembles the engineer profile and the score snapshot into a versioned
//! [`SoulboundPayload`]. Pure apart from the schema constants.

use crate::domain::{EngineerProfile, ScoreProjection, SoulboundPayload};
use shared_crypto::Address;
use shared_types::{Engineer, ScoreSnapshot};
use tracing::warn;

/// Builds unstamped attestation payloads.
#[derive(Debug, Clone, Default)]
pub struct PayloadBuilder {
    sbt_mint: Option<Address>,
}

impl PayloadBuilder {
    /// Builder embedding a fixed asset reference, if any.
    pub fn new(sbt_mint: Option<Address>) -> Self {
        Self { sbt_mint }
    }

    /// Builder from a raw configured mint. An unparsable value is logged and
    /// ignored.
    pub fn from_mint_setting(raw: Option<&str>) -> Self {
        let sbt_mint = raw
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| match s.parse::<Address>() {
                Ok(address) => Some(address),
                Err(e) => {
                    warn!(mint = %s, error = %e, "[sx-01] Ignoring invalid SBT mint address");
                    None
                }
            });
        Self { sbt_mint }
    }

    /// Configured asset reference.
    pub fn sbt_mint(&self) -> Option<Address> {
        self.sbt_mint
    }

    /// Project both entities through their allow-lists and wrap them.
    pub fn build(&self, engineer: &Engineer, score: &ScoreSnapshot) -> SoulboundPayload {
        SoulboundPayload::new(
            EngineerProfile::from(engineer),
            ScoreProjection::from(score),
            self.sbt_mint,
        )
    }
}
