//! # Test Fixtures
//!
//! A fully wired node (identity, anchor, score service, gateway) whose ledger
//! is a [`MockLedgerRpc`] and whose clock is a [`ManualClock`].

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use shared_types::ManualClock;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use sx_02_ledger_anchor::MockLedgerRpc;
use sx_node::{NodeConfig, ServiceContainer};
use tempfile::NamedTempFile;
use tower::ServiceExt;

/// Engineer present in the seeded directory.
pub const KNOWN_ENGINEER: &str = "665f1c2a9b3e4d5f6a7b8c9d";

/// Well-formed id with no engineer behind it.
pub const UNKNOWN_ENGINEER: &str = "000000000000000000000001";

/// 32-byte base58 wallet.
pub const WALLET: &str = "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU";

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, 8, 12, 0, 0).unwrap()
}

/// Engineer seed file in the stored-document shape.
pub fn engineer_seed() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    let engineers = json!([{
        "_id": KNOWN_ENGINEER,
        "name": "Grace Hopper",
        "title": "Principal Engineer",
        "skills": ["rust", "compilers", null],
        "email": "grace@example.com",
        "github_user": "ghopper",
        "date_hired": "2020-01-06",
        "pr_count": 342,
        "estimation_accuracy": 0.87,
        "bug_count": 12,
        "avg_review_time": 3.5,
        "token_cost": 41.25,
        "prompt_history": [],
        "monthly_performance": [82, 88, 91],
        "recent_actions": []
    }]);
    write!(file, "{engineers}").unwrap();
    file
}

pub fn score_body() -> Value {
    json!({
        "engineer_wallet": WALLET,
        "overall_score": 85.5,
        "reliability_score": 90.0,
        "ai_efficiency_score": 78.2,
        "bug_rate": 0.05,
        "confidence": 0.92
    })
}

/// A wired node plus handles on its fakes.
pub struct TestNode {
    pub router: Router,
    pub ledger: Arc<MockLedgerRpc>,
    pub clock: Arc<ManualClock>,
    pub container: ServiceContainer,
    _seed: NamedTempFile,
}

impl TestNode {
    /// In-memory score store.
    pub fn new() -> Self {
        Self::with_scores_path(None)
    }

    /// Optionally backed by a JSON-lines score file.
    pub fn with_scores_path(scores_path: Option<PathBuf>) -> Self {
        let seed = engineer_seed();
        let mut config = NodeConfig::for_testing();
        config.storage.engineers_path = Some(seed.path().to_path_buf());
        config.storage.scores_path = scores_path;

        let ledger = Arc::new(MockLedgerRpc::default());
        let clock = Arc::new(ManualClock::new(start_time()));
        let container = ServiceContainer::build_with(config, ledger.clone(), clock.clone()).unwrap();
        let router = container.gateway().unwrap().router();

        Self {
            router,
            ledger,
            clock,
            container,
            _seed: seed,
        }
    }

    pub async fn publish(&self, engineer_id: &str, body: &Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(format!("/api/v1/engineers/{engineer_id}/scores"))
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn list(&self, engineer_id: &str, limit: Option<i64>) -> (StatusCode, Value) {
        let uri = match limit {
            Some(limit) => format!("/api/v1/engineers/{engineer_id}/scores?limit={limit}"),
            None => format!("/api/v1/engineers/{engineer_id}/scores"),
        };
        self.get(&uri).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }
}

impl Default for TestNode {
    fn default() -> Self {
        Self::new()
    }
}
