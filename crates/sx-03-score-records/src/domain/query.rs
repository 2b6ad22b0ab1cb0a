//! # Listing Rules

use crate::domain::errors::ScoreServiceError;
use shared_types::{ObjectId, ScoreRecord};
use std::cmp::Reverse;

/// Records returned by `list` when no limit is given.
pub const DEFAULT_LIST_LIMIT: usize = 10;

/// Largest accepted `limit`.
pub const MAX_LIST_LIMIT: usize = 100;

/// Resolve a caller-supplied limit. Out-of-range values are rejected, not clamped.
pub fn resolve_limit(limit: Option<i64>) -> Result<usize, ScoreServiceError> {
    match limit {
        None => Ok(DEFAULT_LIST_LIMIT),
        Some(n) if (1..=MAX_LIST_LIMIT as i64).contains(&n) => Ok(n as usize),
        Some(n) => Err(ScoreServiceError::Validation(format!(
            "limit must be between 1 and {MAX_LIST_LIMIT}, got {n}"
        ))),
    }
}

/// Records for one engineer, newest first, at most `limit`.
///
/// Ties on `last_updated` fall back to record id, descending.
pub fn newest_first<'a, I>(records: I, engineer_id: &ObjectId, limit: usize) -> Vec<ScoreRecord>
where
    I: IntoIterator<Item = &'a ScoreRecord>,
{
    let mut matching: Vec<&ScoreRecord> = records
        .into_iter()
        .filter(|r| &r.engineer_id == engineer_id)
        .collect();
    matching.sort_by_key(|r| Reverse((r.last_updated, r.id)));
    matching.into_iter().take(limit).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shared_types::ScoreMetrics;

    fn record(engineer_id: ObjectId, id_byte: u8, minute: u32) -> ScoreRecord {
        ScoreRecord {
            id: ObjectId::from_bytes([id_byte; 12]),
            engineer_id,
            project_id: None,
            engineer_wallet: "w".repeat(32),
            metrics: ScoreMetrics {
                overall_score: 1.0,
                reliability_score: 1.0,
                ai_efficiency_score: 1.0,
                bug_rate: 0.0,
                confidence: 1.0,
            },
            last_updated: Utc.with_ymd_and_hms(2024, 1, 1, 0, minute, 0).unwrap(),
            score_hash: "0".repeat(64),
            signature: "sig".into(),
        }
    }

    #[test]
    fn test_limit_bounds() {
        assert_eq!(resolve_limit(None).unwrap(), 10);
        assert_eq!(resolve_limit(Some(1)).unwrap(), 1);
        assert_eq!(resolve_limit(Some(100)).unwrap(), 100);
        assert!(resolve_limit(Some(0)).is_err());
        assert!(resolve_limit(Some(101)).is_err());
        assert!(resolve_limit(Some(-5)).is_err());
    }

    #[test]
    fn test_newest_first_filters_and_orders() {
        let engineer = ObjectId::from_bytes([1; 12]);
        let other = ObjectId::from_bytes([2; 12]);
        let records = vec![
            record(engineer, 10, 1),
            record(other, 11, 9),
            record(engineer, 12, 5),
            record(engineer, 13, 3),
        ];

        let listed = newest_first(&records, &engineer, 2);
        let ids: Vec<_> = listed.iter().map(|r| r.id).collect();
        assert_eq!(
            ids,
            vec![ObjectId::from_bytes([12; 12]), ObjectId::from_bytes([13; 12])]
        );
    }

    #[test]
    fn test_ties_broken_by_id() {
        let engineer = ObjectId::from_bytes([1; 12]);
        let records = vec![record(engineer, 3, 0), record(engineer, 7, 0)];
        let listed = newest_first(&records, &engineer, 10);
        assert_eq!(listed[0].id, ObjectId::from_bytes([7; 12]));
    }
}
