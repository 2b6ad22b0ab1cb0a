//! # Memo Transaction Contents
//!
//! Decodes what the anchor actually handed the ledger node and checks it
//! against the stored record: the memo is the canonical payload, its
//! SHA-256 is the record's `score_hash`, and the transaction is signed by
//! the node's issuer.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use axum::http::StatusCode;
    use serde_json::Value;
    use shared_crypto::{sha256_hex, Address, Ed25519PublicKey, Ed25519Signature};
    use sx_02_ledger_anchor::algorithms::decode_length;
    use sx_02_ledger_anchor::MEMO_PROGRAM_ID;

    /// Pieces of a single-signature memo transaction.
    struct DecodedMemoTx {
        signature: [u8; 64],
        message: Vec<u8>,
        authority: [u8; 32],
        program: [u8; 32],
        blockhash: [u8; 32],
        memo: Vec<u8>,
    }

    fn decode(wire: &[u8]) -> DecodedMemoTx {
        assert_eq!(wire[0], 1, "one signature");
        let signature: [u8; 64] = wire[1..65].try_into().unwrap();
        let message = wire[65..].to_vec();

        assert_eq!(&message[..3], &[1, 0, 1], "header");
        assert_eq!(message[3], 2, "two account keys");
        let authority: [u8; 32] = message[4..36].try_into().unwrap();
        let program: [u8; 32] = message[36..68].try_into().unwrap();
        let blockhash: [u8; 32] = message[68..100].try_into().unwrap();

        // one instruction, program index 1, one account (index 0)
        assert_eq!(&message[100..104], &[1, 1, 1, 0]);
        let (len, used) = decode_length(&message[104..]).unwrap();
        let start = 104 + used;
        let memo = message[start..start + len].to_vec();
        assert_eq!(start + len, message.len(), "no trailing bytes");

        DecodedMemoTx {
            signature,
            message,
            authority,
            program,
            blockhash,
            memo,
        }
    }

    #[tokio::test]
    async fn test_memo_hash_matches_record() {
        let node = TestNode::new();
        let (status, record) = node.publish(KNOWN_ENGINEER, &score_body()).await;
        assert_eq!(status, StatusCode::CREATED);

        let submissions = node.ledger.submissions();
        assert_eq!(submissions.len(), 1);
        let tx = decode(&submissions[0].wire);

        assert_eq!(sha256_hex(&tx.memo), record["score_hash"].as_str().unwrap());
        assert_eq!(
            bs58::encode(tx.signature).into_string(),
            record["signature"].as_str().unwrap()
        );
    }

    #[tokio::test]
    async fn test_transaction_signed_by_issuer() {
        let node = TestNode::new();
        node.publish(KNOWN_ENGINEER, &score_body()).await;
        let tx = decode(&node.ledger.submissions()[0].wire);

        let issuer = node.container.identity.address();
        assert_eq!(Address::new(tx.authority), issuer);
        assert_eq!(Address::new(tx.program), MEMO_PROGRAM_ID);
        assert_eq!(tx.blockhash, node.ledger.blockhash().0);

        let key = Ed25519PublicKey::from_bytes(tx.authority).unwrap();
        assert!(key
            .verify(&tx.message, &Ed25519Signature::from_bytes(tx.signature))
            .is_ok());
    }

    #[tokio::test]
    async fn test_memo_is_canonical_payload() {
        let node = TestNode::new();
        node.publish(KNOWN_ENGINEER, &score_body()).await;
        let tx = decode(&node.ledger.submissions()[0].wire);

        let text = std::str::from_utf8(&tx.memo).unwrap();
        assert!(text.is_ascii());

        // Top-level keys appear in sorted order.
        let positions: Vec<usize> = [
            "\"engineer\"",
            "\"issued_at\"",
            "\"issuer\"",
            "\"non_transferable\"",
            "\"schema\"",
            "\"score\"",
            "\"token_program\"",
        ]
        .iter()
        .map(|key| text.find(key).unwrap_or_else(|| panic!("missing {key}")))
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{text}");

        let payload: Value = serde_json::from_str(text).unwrap();
        assert_eq!(payload["issuer"], node.container.identity.address().to_base58());
        assert_eq!(payload["issued_at"], "2024-11-08T12:00:00");
        assert_eq!(payload["non_transferable"], true);
        assert_eq!(payload["score"]["engineer_id"], KNOWN_ENGINEER);
        assert_eq!(payload["score"]["engineer_wallet"], WALLET);
        assert_eq!(payload["engineer"]["github_user"], "ghopper");
        assert!(payload.get("sbt_mint").is_none());
    }

    #[tokio::test]
    async fn test_health_reports_signing_issuer() {
        let node = TestNode::new();
        let (status, health) = node.get("/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            health["issuer"],
            node.container.identity.address().to_base58()
        );
    }
}
