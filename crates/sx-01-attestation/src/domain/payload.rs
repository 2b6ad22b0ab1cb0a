//! # Soulbound Payload
//!
//! Typed, allow-listed projections of the engineer document and the score
//! snapshot, and the versioned payload that wraps them.
//!
//! The projections are the only way store entities enter a payload. Fields
//! that must never be attested (history collections, record id, hash,
//! signature) have no slot in these types.

use super::value::{PayloadValue, ToPayloadValue};
use chrono::{DateTime, NaiveDate, Utc};
use shared_crypto::Address;
use shared_types::{Engineer, ObjectId, ScoreMetrics, ScoreSnapshot};

/// Schema identifier embedded in every payload.
pub const SCHEMA_ID: &str = "stirixi.sbt.engineer-score";

/// Schema version, also stamped into the profile and score projections.
pub const SCHEMA_VERSION: &str = "2024-11-08";

/// Token program label carried for wallets that index soulbound tokens.
pub const TOKEN_PROGRAM: &str = "token-2022";

/// Attestations can never be transferred.
pub const NON_TRANSFERABLE: bool = true;

/// Schema reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaRef {
    pub id: &'static str,
    pub version: &'static str,
}

impl SchemaRef {
    /// The schema this crate emits.
    pub const CURRENT: SchemaRef = SchemaRef {
        id: SCHEMA_ID,
        version: SCHEMA_VERSION,
    };
}

impl ToPayloadValue for SchemaRef {
    fn to_payload_value(&self) -> PayloadValue {
        PayloadValue::mapping([("id", self.id.into()), ("version", self.version.into())])
    }
}

/// Allow-listed engineer profile.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineerProfile {
    pub engineer_id: ObjectId,
    pub name: String,
    pub title: String,
    pub skills: Vec<Option<String>>,
    pub email: String,
    pub github_user: String,
    pub date_hired: NaiveDate,
    pub pr_count: i64,
    pub estimation_accuracy: Option<f64>,
    pub bug_count: i64,
    pub avg_review_time: Option<f64>,
    pub token_cost: f64,
    pub schema_version: &'static str,
}

impl From<&Engineer> for EngineerProfile {
    fn from(engineer: &Engineer) -> Self {
        Self {
            engineer_id: engineer.id,
            name: engineer.name.clone(),
            title: engineer.title.clone(),
            skills: engineer.skills.clone(),
            email: engineer.email.clone(),
            github_user: engineer.github_user.clone(),
            date_hired: engineer.date_hired,
            pr_count: engineer.pr_count,
            estimation_accuracy: engineer.estimation_accuracy,
            bug_count: engineer.bug_count,
            avg_review_time: engineer.avg_review_time,
            token_cost: engineer.token_cost,
            schema_version: SCHEMA_VERSION,
        }
    }
}

impl ToPayloadValue for EngineerProfile {
    fn to_payload_value(&self) -> PayloadValue {
        PayloadValue::mapping([
            ("engineer_id", self.engineer_id.into()),
            ("name", self.name.as_str().into()),
            ("title", self.title.as_str().into()),
            (
                "skills",
                PayloadValue::sequence(self.skills.iter().map(|s| s.as_deref())),
            ),
            ("email", self.email.as_str().into()),
            ("github_user", self.github_user.as_str().into()),
            ("date_hired", self.date_hired.into()),
            ("pr_count", self.pr_count.into()),
            ("estimation_accuracy", self.estimation_accuracy.into()),
            ("bug_count", self.bug_count.into()),
            ("avg_review_time", self.avg_review_time.into()),
            ("token_cost", self.token_cost.into()),
            ("schema_version", self.schema_version.into()),
        ])
    }
}

/// Allow-listed score snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreProjection {
    pub engineer_id: ObjectId,
    pub project_id: Option<ObjectId>,
    pub engineer_wallet: String,
    pub metrics: ScoreMetrics,
    pub last_updated: DateTime<Utc>,
    pub schema_version: &'static str,
}

impl From<&ScoreSnapshot> for ScoreProjection {
    fn from(score: &ScoreSnapshot) -> Self {
        Self {
            engineer_id: score.engineer_id,
            project_id: score.project_id,
            engineer_wallet: score.engineer_wallet.clone(),
            metrics: score.metrics,
            last_updated: score.last_updated,
            schema_version: SCHEMA_VERSION,
        }
    }
}

impl ToPayloadValue for ScoreProjection {
    fn to_payload_value(&self) -> PayloadValue {
        let m = &self.metrics;
        PayloadValue::mapping([
            ("engineer_id", self.engineer_id.into()),
            ("project_id", self.project_id.into()),
            ("engineer_wallet", self.engineer_wallet.as_str().into()),
            ("overall_score", m.overall_score.into()),
            ("reliability_score", m.reliability_score.into()),
            ("ai_efficiency_score", m.ai_efficiency_score.into()),
            ("bug_rate", m.bug_rate.into()),
            ("confidence", m.confidence.into()),
            ("last_updated", self.last_updated.into()),
            ("schema_version", self.schema_version.into()),
        ])
    }
}

/// The versioned attestation payload.
///
/// `issuer` and `issued_at` stay empty until the anchor stamps its working
/// copy; both are part of the hashed bytes once set.
#[derive(Debug, Clone, PartialEq)]
pub struct SoulboundPayload {
    schema: SchemaRef,
    engineer: EngineerProfile,
    score: ScoreProjection,
    sbt_mint: Option<Address>,
    issuer: Option<Address>,
    issued_at: Option<DateTime<Utc>>,
}

impl SoulboundPayload {
    /// Assemble an unstamped payload.
    pub fn new(engineer: EngineerProfile, score: ScoreProjection, sbt_mint: Option<Address>) -> Self {
        Self {
            schema: SchemaRef::CURRENT,
            engineer,
            score,
            sbt_mint,
            issuer: None,
            issued_at: None,
        }
    }

    /// Record who issued the attestation and when.
    pub fn stamp(&mut self, issuer: Address, issued_at: DateTime<Utc>) {
        self.issuer = Some(issuer);
        self.issued_at = Some(issued_at);
    }

    pub fn schema(&self) -> SchemaRef {
        self.schema
    }

    pub fn engineer(&self) -> &EngineerProfile {
        &self.engineer
    }

    pub fn score(&self) -> &ScoreProjection {
        &self.score
    }

    pub fn sbt_mint(&self) -> Option<Address> {
        self.sbt_mint
    }

    pub fn issuer(&self) -> Option<Address> {
        self.issuer
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.issued_at
    }

    /// Wallet the attestation is issued to.
    pub fn wallet(&self) -> &str {
        &self.score.engineer_wallet
    }
}

impl ToPayloadValue for SoulboundPayload {
    fn to_payload_value(&self) -> PayloadValue {
        let mut entries = vec![
            ("schema".to_string(), self.schema.to_payload_value()),
            ("engineer".to_string(), self.engineer.to_payload_value()),
            ("score".to_string(), self.score.to_payload_value()),
            ("token_program".to_string(), TOKEN_PROGRAM.into()),
            ("non_transferable".to_string(), NON_TRANSFERABLE.into()),
        ];
        // Optional members are omitted rather than null.
        if let Some(mint) = self.sbt_mint {
            entries.push(("sbt_mint".to_string(), mint.into()));
        }
        if let Some(issuer) = self.issuer {
            entries.push(("issuer".to_string(), issuer.into()));
        }
        if let Some(issued_at) = self.issued_at {
            entries.push(("issued_at".to_string(), issued_at.into()));
        }
        PayloadValue::Mapping(entries)
    }
}
