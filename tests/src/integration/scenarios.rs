//! # Score Publication Scenarios
//!
//! End-to-end through gateway (04) → score records (03) → ledger anchor (02)
//! → attestation core (01), with the ledger node mocked.
//!
//! 1. **A**: known engineer, valid input → 201 with hash and signature
//! 2. **B**: malformed engineer id → 400, ledger untouched
//! 3. **C**: unknown engineer → 404, ledger untouched
//! 4. **D**: node returns an empty signature → 502, nothing stored
//! 5. **E**: five snapshots, `limit=2` → the two newest, newest first

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use axum::http::StatusCode;
    use chrono::{DateTime, Duration, Utc};
    use serde_json::{json, Value};
    use sx_02_ledger_anchor::MockSubmit;

    fn is_hex_hash(value: &Value) -> bool {
        value
            .as_str()
            .map(|s| s.len() == 64 && s.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')))
            .unwrap_or(false)
    }

    fn timestamp(record: &Value) -> DateTime<Utc> {
        record["last_updated"].as_str().unwrap().parse().unwrap()
    }

    // =========================================================================
    // SCENARIO A
    // =========================================================================

    #[tokio::test]
    async fn test_scenario_a_publish_known_engineer() {
        let node = TestNode::new();

        let (status, record) = node.publish(KNOWN_ENGINEER, &score_body()).await;

        assert_eq!(status, StatusCode::CREATED);
        assert!(is_hex_hash(&record["score_hash"]), "{record}");
        assert!(!record["signature"].as_str().unwrap().is_empty());
        assert_eq!(record["engineer_id"], KNOWN_ENGINEER);
        assert_eq!(record["engineer_wallet"], WALLET);
        assert_eq!(record["overall_score"], 85.5);
        assert_eq!(record["project_id"], Value::Null);
        assert_eq!(timestamp(&record), start_time());
        assert_eq!(node.ledger.submissions().len(), 1);
    }

    #[tokio::test]
    async fn test_scenario_a_with_project_id() {
        let node = TestNode::new();
        let mut body = score_body();
        body["project_id"] = json!("507f1f77bcf86cd799439011");

        let (status, record) = node.publish(KNOWN_ENGINEER, &body).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(record["project_id"], "507f1f77bcf86cd799439011");
    }

    #[tokio::test]
    async fn test_published_record_is_listed() {
        let node = TestNode::new();
        let (_, published) = node.publish(KNOWN_ENGINEER, &score_body()).await;

        let (status, listed) = node.list(KNOWN_ENGINEER, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed.as_array().unwrap().len(), 1);
        assert_eq!(listed[0], published);

        let (status, latest) = node
            .get(&format!("/api/v1/engineers/{KNOWN_ENGINEER}/scores/latest"))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(latest, published);
    }

    // =========================================================================
    // SCENARIO B
    // =========================================================================

    #[tokio::test]
    async fn test_scenario_b_malformed_engineer_id() {
        let node = TestNode::new();

        let (status, body) = node.publish("not-an-id", &score_body()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
        assert_eq!(node.ledger.call_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_project_id_rejected_before_anchor() {
        let node = TestNode::new();
        let mut body = score_body();
        body["project_id"] = json!("nope");

        let (status, error) = node.publish(KNOWN_ENGINEER, &body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error["detail"].as_str().unwrap().contains("project_id"));
        assert_eq!(node.ledger.call_count(), 0);
    }

    #[tokio::test]
    async fn test_short_wallet_rejected_before_submission() {
        let node = TestNode::new();
        let mut body = score_body();
        body["engineer_wallet"] = json!("short");

        let (status, _) = node.publish(KNOWN_ENGINEER, &body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(node.ledger.call_count(), 0);
    }

    #[tokio::test]
    async fn test_short_wallet_wins_over_unknown_engineer() {
        let node = TestNode::new();
        let mut body = score_body();
        body["engineer_wallet"] = json!("abcde");

        let (status, error) = node.publish(UNKNOWN_ENGINEER, &body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["error"], "validation_error");
        assert_eq!(node.ledger.call_count(), 0);
    }

    // =========================================================================
    // SCENARIO C
    // =========================================================================

    #[tokio::test]
    async fn test_scenario_c_unknown_engineer() {
        let node = TestNode::new();

        let (status, body) = node.publish(UNKNOWN_ENGINEER, &score_body()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
        assert_eq!(node.ledger.call_count(), 0);
    }

    // =========================================================================
    // SCENARIO D
    // =========================================================================

    #[tokio::test]
    async fn test_scenario_d_empty_signature_stores_nothing() {
        let node = TestNode::new();
        node.ledger.set_submit(MockSubmit::EmptySignature);

        let (status, body) = node.publish(KNOWN_ENGINEER, &score_body()).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "upstream_error");
        assert!(body["detail"]
            .as_str()
            .unwrap()
            .starts_with("Failed to record score on ledger"));

        let (_, listed) = node.list(KNOWN_ENGINEER, None).await;
        assert!(listed.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_node_rejection_keeps_cause() {
        let node = TestNode::new();
        node.ledger
            .set_submit(MockSubmit::Reject("insufficient funds for fee".into()));

        let (status, body) = node.publish(KNOWN_ENGINEER, &score_body()).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["detail"]
            .as_str()
            .unwrap()
            .contains("insufficient funds for fee"));
        let (_, latest) = node
            .get(&format!("/api/v1/engineers/{KNOWN_ENGINEER}/scores/latest"))
            .await;
        assert_eq!(latest, Value::Null);
    }

    #[tokio::test]
    async fn test_unconfirmed_transaction_is_502() {
        let node = TestNode::new();
        node.ledger.set_status(None);

        let (status, _) = node.publish(KNOWN_ENGINEER, &score_body()).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let (_, listed) = node.list(KNOWN_ENGINEER, None).await;
        assert!(listed.as_array().unwrap().is_empty());
    }

    // =========================================================================
    // SCENARIO E
    // =========================================================================

    #[tokio::test]
    async fn test_scenario_e_limit_two_newest_first() {
        let node = TestNode::new();
        for _ in 0..5 {
            let (status, _) = node.publish(KNOWN_ENGINEER, &score_body()).await;
            assert_eq!(status, StatusCode::CREATED);
            node.clock.advance(Duration::minutes(1));
        }

        let (status, listed) = node.list(KNOWN_ENGINEER, Some(2)).await;

        assert_eq!(status, StatusCode::OK);
        let listed = listed.as_array().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(timestamp(&listed[0]), start_time() + Duration::minutes(4));
        assert_eq!(timestamp(&listed[1]), start_time() + Duration::minutes(3));
    }

    #[tokio::test]
    async fn test_default_limit_and_latest_agree() {
        let node = TestNode::new();
        for _ in 0..12 {
            node.publish(KNOWN_ENGINEER, &score_body()).await;
            node.clock.advance(Duration::seconds(30));
        }

        let (_, listed) = node.list(KNOWN_ENGINEER, None).await;
        let (_, latest) = node
            .get(&format!("/api/v1/engineers/{KNOWN_ENGINEER}/scores/latest"))
            .await;

        let listed = listed.as_array().unwrap();
        assert_eq!(listed.len(), 10);
        assert_eq!(listed[0], latest);
        assert!(listed
            .windows(2)
            .all(|pair| timestamp(&pair[0]) >= timestamp(&pair[1])));
    }

    #[tokio::test]
    async fn test_limit_bounds() {
        let node = TestNode::new();
        node.publish(KNOWN_ENGINEER, &score_body()).await;

        assert_eq!(node.list(KNOWN_ENGINEER, Some(0)).await.0, StatusCode::BAD_REQUEST);
        assert_eq!(node.list(KNOWN_ENGINEER, Some(101)).await.0, StatusCode::BAD_REQUEST);
        assert_eq!(node.list(KNOWN_ENGINEER, Some(100)).await.0, StatusCode::OK);
        assert_eq!(node.list(KNOWN_ENGINEER, Some(1)).await.0, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_hash_differs_for_identical_inputs() {
        let node = TestNode::new();

        let (_, first) = node.publish(KNOWN_ENGINEER, &score_body()).await;
        node.clock.advance(Duration::seconds(1));
        let (_, second) = node.publish(KNOWN_ENGINEER, &score_body()).await;

        assert_ne!(first["score_hash"], second["score_hash"]);
    }
}
