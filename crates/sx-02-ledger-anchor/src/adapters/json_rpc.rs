//! # JSON-RPC Ledger Client
//!
//! [`LedgerRpc`] over HTTP. One `reqwest::Client` (and its connection pool)
//! is built at startup and shared by every request.

use crate::config::LedgerConfig;
use crate::domain::{Blockhash, Commitment, RpcError, SendOptions, SignatureStatus};
use crate::ports::LedgerRpc;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

#[derive(Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct JsonRpcResponse<R> {
    result: Option<R>,
    error: Option<JsonRpcErrorObject>,
}

#[derive(Deserialize)]
struct JsonRpcErrorObject {
    code: i64,
    message: String,
}

/// Responses wrapped in `{"context": ..., "value": ...}`.
#[derive(Deserialize)]
struct WithContext<T> {
    value: T,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlockhashValue {
    blockhash: String,
}

/// HTTP JSON-RPC client for the ledger node.
pub struct JsonRpcLedgerClient {
    client: Client,
    endpoint: String,
    request_id: AtomicU64,
}

impl JsonRpcLedgerClient {
    /// Build the client once; reuse it for the process lifetime.
    pub fn new(config: &LedgerConfig) -> Result<Self, RpcError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| RpcError::Config(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.rpc_url.clone(),
            request_id: AtomicU64::new(1),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn next_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::Relaxed)
    }

    async fn call<R: DeserializeOwned>(&self, method: &str, params: Value) -> Result<R, RpcError> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: self.next_id(),
            method,
            params,
        };
        debug!(method, id = request.id, "[sx-02] RPC call");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    RpcError::Network(format!("cannot connect to {}: {}", self.endpoint, e))
                } else if e.is_timeout() {
                    RpcError::Network(format!("request to {} timed out", self.endpoint))
                } else {
                    RpcError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RpcError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let rpc_response: JsonRpcResponse<R> = response
            .json()
            .await
            .map_err(|e| RpcError::Decode(e.to_string()))?;

        if let Some(error) = rpc_response.error {
            return Err(RpcError::Node {
                code: error.code,
                message: error.message,
            });
        }

        rpc_response
            .result
            .ok_or_else(|| RpcError::Decode(format!("missing result for {method}")))
    }
}

/// `sendTransaction` parameters.
pub fn send_transaction_params(wire: &[u8], options: &SendOptions) -> Value {
    json!([
        STANDARD.encode(wire),
        {
            "encoding": "base64",
            "skipPreflight": options.skip_preflight,
            "preflightCommitment": options.preflight_commitment.as_str(),
            "maxRetries": options.max_retries,
        }
    ])
}

#[async_trait]
impl LedgerRpc for JsonRpcLedgerClient {
    async fn latest_blockhash(&self, commitment: Commitment) -> Result<Blockhash, RpcError> {
        let response: WithContext<BlockhashValue> = self
            .call(
                "getLatestBlockhash",
                json!([{ "commitment": commitment.as_str() }]),
            )
            .await?;
        response
            .value
            .blockhash
            .parse()
            .map_err(|e| RpcError::Decode(format!("invalid blockhash: {e}")))
    }

    async fn send_transaction(
        &self,
        wire: &[u8],
        options: &SendOptions,
    ) -> Result<String, RpcError> {
        self.call("sendTransaction", send_transaction_params(wire, options))
            .await
    }

    async fn signature_status(
        &self,
        signature: &str,
    ) -> Result<Option<SignatureStatus>, RpcError> {
        let response: WithContext<Vec<Option<SignatureStatus>>> = self
            .call(
                "getSignatureStatuses",
                json!([[signature], { "searchTransactionHistory": false }]),
            )
            .await?;
        Ok(response.value.into_iter().next().flatten())
    }
}
