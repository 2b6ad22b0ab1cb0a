//! # Ledger Configuration
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SOLANA_RPC_URL` | `https://api.devnet.solana.com` | JSON-RPC endpoint |
//! | `SOLANA_KEYPAIR_PATH` | unset | Authority key file |
//! | `SOLANA_KEYPAIR_JSON` | unset | Inline authority secret |
//! | `SOLANA_SBT_MINT` | unset | Asset reference embedded in payloads |
//! | `SX_LEDGER_TIMEOUT_SECS` | `30` | Per-request RPC timeout |
//! | `SX_LEDGER_CONFIRM` | `true` | Poll until `confirmed` |
//! | `SX_LEDGER_CONFIRM_POLLS` | `20` | Status checks before giving up |
//! | `SX_LEDGER_CONFIRM_INTERVAL_MS` | `500` | Delay between status checks |

use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Default public endpoint.
pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Invalid value.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Where the signing identity comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityConfig {
    /// Key file holding a JSON array of 64 bytes.
    pub keypair_path: Option<PathBuf>,
    /// Inline secret: JSON byte array or base58 string.
    pub keypair_inline: Option<String>,
}

/// Post-submission confirmation polling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationConfig {
    pub enabled: bool,
    pub max_polls: u32,
    pub poll_interval: Duration,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_polls: 20,
            poll_interval: Duration::from_millis(500),
        }
    }
}

/// Ledger anchor configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    pub rpc_url: String,
    pub request_timeout: Duration,
    pub identity: IdentityConfig,
    /// Raw mint setting; validated when the payload builder is made.
    pub sbt_mint: Option<String>,
    pub confirmation: ConfirmationConfig,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            identity: IdentityConfig::default(),
            sbt_mint: None,
            confirmation: ConfirmationConfig::default(),
        }
    }
}

impl LedgerConfig {
    /// Read configuration from the environment. Unset or blank variables
    /// fall back to defaults; values that do not parse are rejected.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut config = Self::default();

        if let Some(url) = var("SOLANA_RPC_URL") {
            config.rpc_url = url;
        }
        if let Some(secs) = var("SX_LEDGER_TIMEOUT_SECS") {
            config.request_timeout =
                Duration::from_secs(parse_number("SX_LEDGER_TIMEOUT_SECS", &secs)?);
        }
        config.identity = IdentityConfig {
            keypair_path: var("SOLANA_KEYPAIR_PATH").map(PathBuf::from),
            keypair_inline: var("SOLANA_KEYPAIR_JSON"),
        };
        config.sbt_mint = var("SOLANA_SBT_MINT");

        if let Some(flag) = var("SX_LEDGER_CONFIRM") {
            config.confirmation.enabled = parse_flag("SX_LEDGER_CONFIRM", &flag)?;
        }
        if let Some(polls) = var("SX_LEDGER_CONFIRM_POLLS") {
            config.confirmation.max_polls = parse_number("SX_LEDGER_CONFIRM_POLLS", &polls)?;
        }
        if let Some(ms) = var("SX_LEDGER_CONFIRM_INTERVAL_MS") {
            config.confirmation.poll_interval =
                Duration::from_millis(parse_number("SX_LEDGER_CONFIRM_INTERVAL_MS", &ms)?);
        }

        Ok(config)
    }

    /// Configuration for tests: local endpoint, fast polling.
    pub fn for_testing() -> Self {
        Self {
            rpc_url: "http://127.0.0.1:8899".to_string(),
            request_timeout: Duration::from_secs(5),
            confirmation: ConfirmationConfig {
                enabled: true,
                max_polls: 3,
                poll_interval: Duration::from_millis(1),
            },
            ..Self::default()
        }
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.rpc_url.starts_with("http://") || self.rpc_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "rpc_url".to_string(),
                reason: format!("{:?} is not an http(s) URL", self.rpc_url),
            });
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.confirmation.enabled && self.confirmation.max_polls == 0 {
            return Err(ConfigError::InvalidValue {
                field: "confirmation.max_polls".to_string(),
                reason: "must be at least 1 when confirmation is enabled".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidValue {
        field: field.to_string(),
        reason: format!("{raw:?} is not a non-negative integer"),
    })
}

fn parse_flag(field: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("{raw:?} is not a boolean"),
        }),
    }
}
