//! # Service Container
//!
//! Builds every subsystem once at startup, in dependency order:
//!
//! 1. Signing identity (fatal on a configured but unreadable key)
//! 2. Ledger RPC client and anchor
//! 3. Payload builder (optional SBT mint)
//! 4. Engineer directory and score store
//! 5. Score record service
//! 6. API gateway

use crate::config::{NodeConfig, NodeConfigError, StorageConfig};
use shared_types::{Clock, SystemClock};
use std::sync::Arc;
use sx_01_attestation::PayloadBuilder;
use sx_02_ledger_anchor::{
    IdentityError, JsonRpcLedgerClient, LedgerAnchor, LedgerRpc, RpcError, SigningIdentity,
};
use sx_03_score_records::{
    adapters::load_engineers, FileScoreRepository, InMemoryEngineerDirectory,
    InMemoryScoreRepository, ScoreRecordApi, ScoreRecordService, ScoreRepository, StoreError,
};
use sx_04_api_gateway::{ApiGatewayService, GatewayError};
use thiserror::Error;
use tracing::{info, warn};

/// Startup failures.
#[derive(Debug, Error)]
pub enum NodeError {
    #[error(transparent)]
    Config(#[from] NodeConfigError),

    #[error("signing identity: {0}")]
    Identity(#[from] IdentityError),

    #[error("ledger client: {0}")]
    Rpc(#[from] RpcError),

    #[error("storage: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Wired subsystems, shared for the process lifetime.
pub struct ServiceContainer {
    pub config: NodeConfig,
    pub identity: Arc<SigningIdentity>,
    pub scores: Arc<dyn ScoreRecordApi>,
}

impl ServiceContainer {
    /// Wire everything against the configured ledger node.
    pub fn build(config: NodeConfig) -> Result<Self, NodeError> {
        config.validate()?;
        let rpc = Arc::new(JsonRpcLedgerClient::new(&config.ledger)?);
        info!(endpoint = %rpc.endpoint(), "[sx-node] Ledger RPC client ready");
        Self::build_with(config, rpc, Arc::new(SystemClock))
    }

    /// Wire everything against a caller-supplied ledger client and clock.
    pub fn build_with(
        config: NodeConfig,
        rpc: Arc<dyn LedgerRpc>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, NodeError> {
        config.validate()?;

        let identity = Arc::new(SigningIdentity::resolve(&config.ledger.identity)?);
        info!(
            issuer = %identity.address(),
            source = ?identity.source(),
            "[sx-node] Signing identity resolved"
        );

        let anchor = Arc::new(LedgerAnchor::new(
            rpc,
            Arc::clone(&identity),
            Arc::clone(&clock),
            config.ledger.confirmation.clone(),
        ));

        let builder = PayloadBuilder::from_mint_setting(config.ledger.sbt_mint.as_deref());

        let engineers = Arc::new(engineer_directory(&config.storage)?);
        let store = score_store(&config.storage)?;

        let scores: Arc<dyn ScoreRecordApi> = Arc::new(ScoreRecordService::new(
            engineers, store, anchor, clock, builder,
        ));

        Ok(Self {
            config,
            identity,
            scores,
        })
    }

    /// HTTP gateway over the score service.
    pub fn gateway(&self) -> Result<ApiGatewayService, NodeError> {
        Ok(ApiGatewayService::new(
            self.config.gateway.clone(),
            Arc::clone(&self.scores),
        )?)
    }
}

fn engineer_directory(storage: &StorageConfig) -> Result<InMemoryEngineerDirectory, NodeError> {
    match &storage.engineers_path {
        Some(path) => {
            let engineers = load_engineers(path)?;
            Ok(InMemoryEngineerDirectory::with_engineers(engineers))
        }
        None => {
            warn!("[sx-node] SX_ENGINEERS_PATH not set; engineer directory is empty");
            Ok(InMemoryEngineerDirectory::new())
        }
    }
}

fn score_store(storage: &StorageConfig) -> Result<Arc<dyn ScoreRepository>, NodeError> {
    match &storage.scores_path {
        Some(path) => Ok(Arc::new(FileScoreRepository::open(path)?)),
        None => {
            warn!("[sx-node] SX_SCORES_PATH not set; scores are kept in memory only");
            Ok(Arc::new(InMemoryScoreRepository::new()))
        }
    }
}
