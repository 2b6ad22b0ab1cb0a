//! # Score Store Across Restarts
//!
//! Records written through the JSON-lines store are visible to a node
//! started later on the same file; failed publications leave the file alone.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use axum::http::StatusCode;
    use chrono::Duration;
    use sx_02_ledger_anchor::MockSubmit;

    #[tokio::test]
    async fn test_records_survive_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data/scores.jsonl");

        let published = {
            let node = TestNode::with_scores_path(Some(path.clone()));
            let (status, first) = node.publish(KNOWN_ENGINEER, &score_body()).await;
            assert_eq!(status, StatusCode::CREATED);
            node.clock.advance(Duration::minutes(5));
            let (_, second) = node.publish(KNOWN_ENGINEER, &score_body()).await;
            vec![second, first]
        };

        let restarted = TestNode::with_scores_path(Some(path));
        let (status, listed) = restarted.list(KNOWN_ENGINEER, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed.as_array().unwrap(), &published);
    }

    #[tokio::test]
    async fn test_failed_publication_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.jsonl");

        let node = TestNode::with_scores_path(Some(path.clone()));
        node.ledger.set_submit(MockSubmit::EmptySignature);
        let (status, _) = node.publish(KNOWN_ENGINEER, &score_body()).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }
}
