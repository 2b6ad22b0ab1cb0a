//! # Score Input
//!
//! The caller-facing request shape. Identifiers arrive as strings and are
//! parsed here so format errors surface as validation errors.

use crate::domain::errors::ScoreServiceError;
use serde::{Deserialize, Serialize};
use shared_types::{ObjectId, ScoreDraft, ScoreMetrics};
use sx_02_ledger_anchor::validate_wallet;

/// Fields a caller supplies when publishing a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreInput {
    #[serde(default)]
    pub project_id: Option<String>,
    pub engineer_wallet: String,
    pub overall_score: f64,
    pub reliability_score: f64,
    pub ai_efficiency_score: f64,
    pub bug_rate: f64,
    pub confidence: f64,
}

impl ScoreInput {
    /// Parse identifiers, shape-check the wallet and check scores are finite.
    pub fn into_draft(self) -> Result<ScoreDraft, ScoreServiceError> {
        validate_wallet(&self.engineer_wallet)?;

        let project_id = match self.project_id.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<ObjectId>().map_err(|e| {
                ScoreServiceError::Validation(format!("Invalid project_id: {e}"))
            })?),
        };

        let metrics = ScoreMetrics {
            overall_score: self.overall_score,
            reliability_score: self.reliability_score,
            ai_efficiency_score: self.ai_efficiency_score,
            bug_rate: self.bug_rate,
            confidence: self.confidence,
        };
        metrics
            .validate()
            .map_err(|e| ScoreServiceError::Validation(e.to_string()))?;

        Ok(ScoreDraft {
            project_id,
            engineer_wallet: self.engineer_wallet,
            metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ScoreInput {
        serde_json::from_value(serde_json::json!({
            "engineer_wallet": "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin",
            "overall_score": 85,
            "reliability_score": 90.5,
            "ai_efficiency_score": 70,
            "bug_rate": 0.1,
            "confidence": 0.8
        }))
        .unwrap()
    }

    #[test]
    fn test_integers_accepted_as_scores() {
        let draft = input().into_draft().unwrap();
        assert_eq!(draft.metrics.overall_score, 85.0);
        assert_eq!(draft.project_id, None);
    }

    #[test]
    fn test_project_id_parsed() {
        let mut raw = input();
        raw.project_id = Some("6730f0a1b2c3d4e5f6a7b8c9".into());
        assert!(raw.into_draft().unwrap().project_id.is_some());

        let mut bad = input();
        bad.project_id = Some("project-7".into());
        assert!(matches!(
            bad.into_draft(),
            Err(ScoreServiceError::Validation(msg)) if msg.contains("project_id")
        ));
    }

    #[test]
    fn test_short_wallet_rejected() {
        let mut raw = input();
        raw.engineer_wallet = "abcde".into();
        assert!(matches!(
            raw.into_draft(),
            Err(ScoreServiceError::Validation(msg)) if msg.contains("engineer_wallet")
        ));

        let mut empty = input();
        empty.engineer_wallet = String::new();
        assert!(matches!(empty.into_draft(), Err(ScoreServiceError::Validation(_))));
    }

    #[test]
    fn test_non_finite_score_rejected() {
        let mut raw = input();
        raw.confidence = f64::INFINITY;
        assert!(matches!(
            raw.into_draft(),
            Err(ScoreServiceError::Validation(msg)) if msg.contains("confidence")
        ));
    }
}
