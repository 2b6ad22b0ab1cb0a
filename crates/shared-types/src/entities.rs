//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Directory**: `Engineer`, the stored engineer document
//! - **Scores**: `ScoreMetrics`, and the snapshot lifecycle
//!   `ScoreDraft` → `ScoreSnapshot` → `ScoreRecord`

use crate::errors::DraftError;
use crate::object_id::ObjectId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// CLUSTER A: THE DIRECTORY
// =============================================================================

/// An engineer document as held by the backing store.
///
/// The history collections are carried so documents round-trip, but nothing
/// in the attestation path reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Engineer {
    /// Store-assigned identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: ObjectId,
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub skills: Vec<Option<String>>,
    pub email: String,
    pub github_user: String,
    pub date_hired: NaiveDate,
    #[serde(default)]
    pub pr_count: i64,
    #[serde(default)]
    pub estimation_accuracy: Option<f64>,
    #[serde(default)]
    pub bug_count: i64,
    /// Average review turnaround, in hours.
    #[serde(default)]
    pub avg_review_time: Option<f64>,
    #[serde(default)]
    pub token_cost: f64,
    /// References to prompt documents.
    #[serde(default)]
    pub prompt_history: Vec<ObjectId>,
    #[serde(default)]
    pub monthly_performance: Vec<i64>,
    /// References to action documents.
    #[serde(default)]
    pub recent_actions: Vec<ObjectId>,
}

// =============================================================================
// CLUSTER B: SCORES
// =============================================================================

/// The four computed scores plus the model confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreMetrics {
    pub overall_score: f64,
    pub reliability_score: f64,
    pub ai_efficiency_score: f64,
    pub bug_rate: f64,
    pub confidence: f64,
}

impl ScoreMetrics {
    /// Reject NaN and infinities.
    pub fn validate(&self) -> Result<(), DraftError> {
        let fields = [
            ("overall_score", self.overall_score),
            ("reliability_score", self.reliability_score),
            ("ai_efficiency_score", self.ai_efficiency_score),
            ("bug_rate", self.bug_rate),
            ("confidence", self.confidence),
        ];
        match fields.iter().find(|(_, value)| !value.is_finite()) {
            Some((field, _)) => Err(DraftError::NonFiniteScore { field: *field }),
            None => Ok(()),
        }
    }
}

/// Caller-supplied score fields (state `Draft`).
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreDraft {
    pub project_id: Option<ObjectId>,
    pub engineer_wallet: String,
    pub metrics: ScoreMetrics,
}

impl ScoreDraft {
    /// Bind the draft to an existing engineer (state `PendingAnchor`).
    pub fn into_snapshot(self, engineer_id: ObjectId, now: DateTime<Utc>) -> ScoreSnapshot {
        ScoreSnapshot {
            engineer_id,
            project_id: self.project_id,
            engineer_wallet: self.engineer_wallet,
            metrics: self.metrics,
            last_updated: now,
        }
    }
}

/// A score bound to an engineer, awaiting its ledger anchor.
///
/// Has no identifier, hash or signature; those only exist on [`ScoreRecord`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSnapshot {
    pub engineer_id: ObjectId,
    pub project_id: Option<ObjectId>,
    pub engineer_wallet: String,
    pub metrics: ScoreMetrics,
    pub last_updated: DateTime<Utc>,
}

impl ScoreSnapshot {
    /// Finalize after a confirmed anchor (state `Anchored`, terminal).
    pub fn into_record(
        self,
        id: ObjectId,
        score_hash: String,
        signature: String,
        anchored_at: DateTime<Utc>,
    ) -> ScoreRecord {
        ScoreRecord {
            id,
            engineer_id: self.engineer_id,
            project_id: self.project_id,
            engineer_wallet: self.engineer_wallet,
            metrics: self.metrics,
            last_updated: anchored_at,
            score_hash,
            signature,
        }
    }
}

/// An anchored, append-only score record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    #[serde(alias = "_id")]
    pub id: ObjectId,
    pub engineer_id: ObjectId,
    pub project_id: Option<ObjectId>,
    pub engineer_wallet: String,
    #[serde(flatten)]
    pub metrics: ScoreMetrics,
    pub last_updated: DateTime<Utc>,
    /// SHA-256 of the anchored payload, 64 lowercase hex characters.
    pub score_hash: String,
    /// Ledger transaction signature.
    #[serde(alias = "solana_signature")]
    pub signature: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn metrics() -> ScoreMetrics {
        ScoreMetrics {
            overall_score: 88.0,
            reliability_score: 91.5,
            ai_efficiency_score: 79.0,
            bug_rate: 0.07,
            confidence: 0.93,
        }
    }

    #[test]
    fn test_metrics_reject_non_finite() {
        let mut bad = metrics();
        bad.bug_rate = f64::NAN;
        assert_eq!(
            bad.validate(),
            Err(DraftError::NonFiniteScore { field: "bug_rate" })
        );

        bad.bug_rate = 0.1;
        bad.confidence = f64::INFINITY;
        assert_eq!(
            bad.validate(),
            Err(DraftError::NonFiniteScore { field: "confidence" })
        );
        assert!(metrics().validate().is_ok());
    }

    #[test]
    fn test_lifecycle_refreshes_timestamp() {
        let engineer_id = ObjectId::parse_str("64b7f0c2a1b2c3d4e5f60718").unwrap();
        let drafted_at = Utc.with_ymd_and_hms(2024, 11, 8, 9, 0, 0).unwrap();
        let anchored_at = Utc.with_ymd_and_hms(2024, 11, 8, 9, 0, 3).unwrap();

        let draft = ScoreDraft {
            project_id: None,
            engineer_wallet: "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin".into(),
            metrics: metrics(),
        };
        let snapshot = draft.into_snapshot(engineer_id, drafted_at);
        assert_eq!(snapshot.last_updated, drafted_at);

        let record = snapshot.into_record(
            ObjectId::new(),
            "ab".repeat(32),
            "5sig".into(),
            anchored_at,
        );
        assert_eq!(record.engineer_id, engineer_id);
        assert_eq!(record.last_updated, anchored_at);
    }

    #[test]
    fn test_record_json_shape() {
        let record = ScoreRecord {
            id: ObjectId::parse_str("64b7f0c2a1b2c3d4e5f60719").unwrap(),
            engineer_id: ObjectId::parse_str("64b7f0c2a1b2c3d4e5f60718").unwrap(),
            project_id: None,
            engineer_wallet: "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin".into(),
            metrics: metrics(),
            last_updated: Utc.with_ymd_and_hms(2024, 11, 8, 9, 0, 0).unwrap(),
            score_hash: "ab".repeat(32),
            signature: "5sig".into(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], "64b7f0c2a1b2c3d4e5f60719");
        assert_eq!(value["overall_score"], 88.0);
        assert_eq!(value["project_id"], serde_json::Value::Null);
        assert!(value.get("metrics").is_none());

        let back: ScoreRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_record_accepts_legacy_field_names() {
        let json = r#"{
            "_id": "64b7f0c2a1b2c3d4e5f60719",
            "engineer_id": "64b7f0c2a1b2c3d4e5f60718",
            "project_id": null,
            "engineer_wallet": "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin",
            "overall_score": 80,
            "reliability_score": 70,
            "ai_efficiency_score": 60,
            "bug_rate": 0.1,
            "confidence": 0.9,
            "last_updated": "2024-11-08T09:00:00Z",
            "score_hash": "00",
            "solana_signature": "sig"
        }"#;
        let record: ScoreRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.signature, "sig");
        assert_eq!(record.metrics.overall_score, 80.0);
    }

    #[test]
    fn test_engineer_document_defaults() {
        let json = r#"{
            "_id": {"$oid": "64b7f0c2a1b2c3d4e5f60718"},
            "name": "Ada",
            "title": "Staff Engineer",
            "email": "ada@example.com",
            "github_user": "ada",
            "date_hired": "2021-03-01"
        }"#;
        let engineer: Engineer = serde_json::from_str(json).unwrap();
        assert_eq!(engineer.pr_count, 0);
        assert!(engineer.skills.is_empty());
        assert!(engineer.prompt_history.is_empty());
        assert_eq!(engineer.estimation_accuracy, None);
    }
}
