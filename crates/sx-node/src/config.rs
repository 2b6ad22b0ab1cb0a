//! # Node Configuration
//!
//! Unified configuration for all subsystems, read from the environment.

use std::env;
use std::path::PathBuf;
use stirixi_telemetry::TelemetryConfig;
use sx_02_ledger_anchor::LedgerConfig;
use sx_04_api_gateway::GatewayConfig;
use thiserror::Error;

/// Complete node configuration.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    /// Ledger RPC, signing identity and confirmation policy.
    pub ledger: LedgerConfig,
    /// HTTP surface.
    pub gateway: GatewayConfig,
    /// Engineer seed and score store locations.
    pub storage: StorageConfig,
    /// Logging.
    pub telemetry: TelemetryConfig,
}

impl NodeConfig {
    /// Read every section from the environment.
    pub fn from_env() -> Result<Self, NodeConfigError> {
        Ok(Self {
            ledger: LedgerConfig::from_env()?,
            gateway: GatewayConfig::from_env()?,
            storage: StorageConfig::from_env(),
            telemetry: TelemetryConfig::from_env(),
        })
    }

    /// Local endpoints, in-memory stores.
    pub fn for_testing() -> Self {
        Self {
            ledger: LedgerConfig::for_testing(),
            gateway: GatewayConfig::for_testing(),
            storage: StorageConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<(), NodeConfigError> {
        self.ledger.validate()?;
        self.gateway.validate()?;
        Ok(())
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageConfig {
    /// JSON array of engineers loaded at startup.
    pub engineers_path: Option<PathBuf>,
    /// Append-only JSON-lines score store; in-memory when unset.
    pub scores_path: Option<PathBuf>,
}

impl StorageConfig {
    /// `SX_ENGINEERS_PATH`, `SX_SCORES_PATH`. Blank values count as unset.
    pub fn from_env() -> Self {
        Self {
            engineers_path: path_var("SX_ENGINEERS_PATH"),
            scores_path: path_var("SX_SCORES_PATH"),
        }
    }
}

fn path_var(name: &str) -> Option<PathBuf> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum NodeConfigError {
    #[error("ledger configuration: {0}")]
    Ledger(#[from] sx_02_ledger_anchor::ConfigError),

    #[error("gateway configuration: {0}")]
    Gateway(#[from] sx_04_api_gateway::ConfigError),
}
