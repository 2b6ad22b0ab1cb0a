//! # Score Record Service
//!
//! Application service implementing [`ScoreRecordApi`].
//!
//! `publish` touches the outside world in a fixed order and stops at the
//! first failure:
//!
//! 1. parse identifiers, wallet shape and scores (local)
//! 2. look up the engineer (store)
//! 3. anchor the payload (ledger)
//! 4. insert the anchored record (store)

use crate::domain::{resolve_limit, ErrorKind, ScoreInput, ScoreServiceError};
use crate::ports::{EngineerDirectory, ScoreRecordApi, ScoreRepository};
use async_trait::async_trait;
use shared_crypto::Address;
use shared_types::{Clock, ObjectId, ScoreRecord};
use std::sync::Arc;
use stirixi_telemetry::SCORE_PUBLICATIONS;
use sx_01_attestation::PayloadBuilder;
use sx_02_ledger_anchor::AttestationAnchor;
use tracing::{debug, error, info, warn};

/// Score Record Service.
pub struct ScoreRecordService {
    engineers: Arc<dyn EngineerDirectory>,
    scores: Arc<dyn ScoreRepository>,
    anchor: Arc<dyn AttestationAnchor>,
    clock: Arc<dyn Clock>,
    builder: PayloadBuilder,
}

impl ScoreRecordService {
    pub fn new(
        engineers: Arc<dyn EngineerDirectory>,
        scores: Arc<dyn ScoreRepository>,
        anchor: Arc<dyn AttestationAnchor>,
        clock: Arc<dyn Clock>,
        builder: PayloadBuilder,
    ) -> Self {
        Self {
            engineers,
            scores,
            anchor,
            clock,
            builder,
        }
    }

    async fn publish_inner(
        &self,
        engineer_id: &str,
        input: ScoreInput,
    ) -> Result<ScoreRecord, ScoreServiceError> {
        let engineer_id = parse_engineer_id(engineer_id)?;
        let draft = input.into_draft()?;

        let engineer = self
            .engineers
            .find_engineer(&engineer_id)
            .await?
            .ok_or(ScoreServiceError::EngineerNotFound(engineer_id))?;

        let snapshot = draft.into_snapshot(engineer.id, self.clock.now());
        let payload = self.builder.build(&engineer, &snapshot);
        let wallet = snapshot.engineer_wallet.clone();

        let anchored = self.anchor.anchor(&wallet, payload).await?;

        let record = snapshot.into_record(
            ObjectId::new(),
            anchored.score_hash,
            anchored.signature,
            self.clock.now(),
        );
        if let Err(e) = self.scores.insert(&record).await {
            // The transaction is on the ledger but has no local record.
            error!(
                engineer_id = %record.engineer_id,
                signature = %record.signature,
                score_hash = %record.score_hash,
                error = %e,
                "[sx-03] Anchored score could not be persisted"
            );
            return Err(e.into());
        }
        Ok(record)
    }
}

fn parse_engineer_id(raw: &str) -> Result<ObjectId, ScoreServiceError> {
    raw.parse()
        .map_err(|e| ScoreServiceError::Validation(format!("Invalid engineer_id: {e}")))
}

#[async_trait]
impl ScoreRecordApi for ScoreRecordService {
    async fn publish(
        &self,
        engineer_id: &str,
        input: ScoreInput,
    ) -> Result<ScoreRecord, ScoreServiceError> {
        debug!(engineer_id, "[sx-03] Publishing score");

        match self.publish_inner(engineer_id, input).await {
            Ok(record) => {
                SCORE_PUBLICATIONS.with_label_values(&["anchored"]).inc();
                info!(
                    engineer_id = %record.engineer_id,
                    record_id = %record.id,
                    score_hash = %record.score_hash,
                    signature = %record.signature,
                    "[sx-03] Score anchored and recorded"
                );
                Ok(record)
            }
            Err(e) => {
                let kind = e.kind();
                SCORE_PUBLICATIONS
                    .with_label_values(&[kind.outcome_label()])
                    .inc();
                match kind {
                    ErrorKind::Validation | ErrorKind::NotFound => {
                        debug!(engineer_id, error = %e, "[sx-03] Score rejected")
                    }
                    ErrorKind::Upstream | ErrorKind::Internal => {
                        warn!(engineer_id, error = %e, "[sx-03] Score publication failed")
                    }
                }
                Err(e)
            }
        }
    }

    async fn list(
        &self,
        engineer_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<ScoreRecord>, ScoreServiceError> {
        let engineer_id = parse_engineer_id(engineer_id)?;
        let limit = resolve_limit(limit)?;
        Ok(self.scores.find_by_engineer(&engineer_id, limit).await?)
    }

    async fn latest(&self, engineer_id: &str) -> Result<Option<ScoreRecord>, ScoreServiceError> {
        let engineer_id = parse_engineer_id(engineer_id)?;
        let mut newest = self.scores.find_by_engineer(&engineer_id, 1).await?;
        Ok(newest.pop())
    }

    fn issuer(&self) -> Address {
        self.anchor.issuer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryEngineerDirectory, InMemoryScoreRepository};
    use crate::domain::StoreError;
    use chrono::{Duration, TimeZone, Utc};
    use shared_types::{Engineer, ManualClock};
    use sx_02_ledger_anchor::{
        ConfirmationConfig, LedgerAnchor, MockLedgerRpc, MockSubmit, SigningIdentity,
    };

    const WALLET: &str = "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin";
    const ENGINEER_ID: &str = "6730f0a1b2c3d4e5f6a7b8c9";

    fn engineer() -> Engineer {
        serde_json::from_value(serde_json::json!({
            "_id": ENGINEER_ID,
            "name": "Ada",
            "title": "Staff Engineer",
            "skills": ["rust"],
            "email": "ada@example.com",
            "github_user": "ada",
            "date_hired": "2021-03-15",
            "prompt_history": ["6730f0a1b2c3d4e5f6a7b8ca"],
        }))
        .unwrap()
    }

    fn input() -> ScoreInput {
        ScoreInput {
            project_id: None,
            engineer_wallet: WALLET.to_string(),
            overall_score: 85.0,
            reliability_score: 90.0,
            ai_efficiency_score: 80.0,
            bug_rate: 0.1,
            confidence: 0.9,
        }
    }

    struct Fixture {
        rpc: Arc<MockLedgerRpc>,
        scores: Arc<InMemoryScoreRepository>,
        clock: Arc<ManualClock>,
        service: ScoreRecordService,
    }

    fn fixture_with_scores(
        scores: Arc<dyn ScoreRepository>,
    ) -> (Arc<MockLedgerRpc>, Arc<ManualClock>, ScoreRecordService) {
        let rpc = Arc::new(MockLedgerRpc::new(MockSubmit::Accept));
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 11, 8, 9, 30, 0).unwrap(),
        ));
        let anchor = Arc::new(LedgerAnchor::new(
            rpc.clone(),
            Arc::new(SigningIdentity::ephemeral()),
            clock.clone(),
            ConfirmationConfig::default(),
        ));
        let service = ScoreRecordService::new(
            Arc::new(InMemoryEngineerDirectory::with_engineers([engineer()])),
            scores,
            anchor,
            clock.clone(),
            PayloadBuilder::new(None),
        );
        (rpc, clock, service)
    }

    fn fixture() -> Fixture {
        let scores = Arc::new(InMemoryScoreRepository::new());
        let (rpc, clock, service) = fixture_with_scores(scores.clone());
        Fixture {
            rpc,
            scores,
            clock,
            service,
        }
    }

    #[tokio::test]
    async fn test_publish_anchors_and_persists() {
        let f = fixture();
        let record = f.service.publish(ENGINEER_ID, input()).await.unwrap();

        assert_eq!(record.engineer_id.to_string(), ENGINEER_ID);
        assert_eq!(record.score_hash.len(), 64);
        assert!(record
            .score_hash
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        assert!(!record.signature.is_empty());
        assert_eq!(record.last_updated, f.clock.now());
        assert_eq!(f.scores.len(), 1);
        assert_eq!(f.rpc.submissions().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_engineer_id_touches_nothing() {
        let f = fixture();
        let err = f.service.publish("not-an-id", input()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(f.rpc.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_engineer_not_anchored() {
        let f = fixture();
        let err = f
            .service
            .publish("000000000000000000000000", input())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(f.rpc.call_count(), 0);
    }

    #[tokio::test]
    async fn test_short_wallet_is_validation() {
        let f = fixture();
        let mut bad = input();
        bad.engineer_wallet = "abcde".into();
        let err = f.service.publish(ENGINEER_ID, bad).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(f.rpc.call_count(), 0);
    }

    /// Directory that counts lookups and knows no one.
    #[derive(Default)]
    struct CountingDirectory {
        lookups: std::sync::atomic::AtomicUsize,
    }

    #[async_trait]
    impl EngineerDirectory for CountingDirectory {
        async fn find_engineer(&self, _id: &ObjectId) -> Result<Option<Engineer>, StoreError> {
            self.lookups
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_short_wallet_checked_before_engineer_lookup() {
        let rpc = Arc::new(MockLedgerRpc::new(MockSubmit::Accept));
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let directory = Arc::new(CountingDirectory::default());
        let service = ScoreRecordService::new(
            directory.clone(),
            Arc::new(InMemoryScoreRepository::new()),
            Arc::new(LedgerAnchor::new(
                rpc.clone(),
                Arc::new(SigningIdentity::ephemeral()),
                clock.clone(),
                ConfirmationConfig::default(),
            )),
            clock,
            PayloadBuilder::new(None),
        );
        let mut bad = input();
        bad.engineer_wallet = "abcde".into();

        let err = service
            .publish("000000000000000000000000", bad)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(
            directory.lookups.load(std::sync::atomic::Ordering::SeqCst),
            0
        );
        assert_eq!(rpc.call_count(), 0);
    }

    #[tokio::test]
    async fn test_anchor_failure_persists_nothing() {
        let f = fixture();
        f.rpc.set_submit(MockSubmit::EmptySignature);
        let err = f.service.publish(ENGINEER_ID, input()).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Upstream);
        assert!(err.to_string().starts_with("Failed to record score on ledger:"));
        assert!(f.service.list(ENGINEER_ID, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_newest_first_with_limit() {
        let f = fixture();
        for _ in 0..5 {
            f.service.publish(ENGINEER_ID, input()).await.unwrap();
            f.clock.advance(Duration::minutes(1));
        }

        let listed = f.service.list(ENGINEER_ID, Some(2)).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed[0].last_updated > listed[1].last_updated);

        let latest = f.service.latest(ENGINEER_ID).await.unwrap().unwrap();
        assert_eq!(latest, listed[0]);
    }

    #[tokio::test]
    async fn test_list_rejects_bad_limit() {
        let f = fixture();
        for limit in [0, 101] {
            let err = f.service.list(ENGINEER_ID, Some(limit)).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
        }
    }

    #[tokio::test]
    async fn test_latest_without_records_is_none() {
        let f = fixture();
        assert_eq!(f.service.latest(ENGINEER_ID).await.unwrap(), None);
        assert_eq!(
            f.service.latest("000000000000000000000000").await.unwrap(),
            None
        );
    }

    struct FailingScores;

    #[async_trait]
    impl ScoreRepository for FailingScores {
        async fn insert(&self, _record: &ScoreRecord) -> Result<(), StoreError> {
            Err(StoreError::Io("read-only filesystem".into()))
        }

        async fn find_by_engineer(
            &self,
            _engineer_id: &ObjectId,
            _limit: usize,
        ) -> Result<Vec<ScoreRecord>, StoreError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_store_failure_after_anchor_is_internal() {
        let (rpc, _clock, service) = fixture_with_scores(Arc::new(FailingScores));
        let err = service.publish(ENGINEER_ID, input()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
        // The ledger write already happened.
        assert_eq!(rpc.submissions().len(), 1);
    }
}
