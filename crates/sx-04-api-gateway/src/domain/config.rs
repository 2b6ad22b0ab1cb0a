//! Gateway configuration with validation.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SX_HTTP_HOST` | `0.0.0.0` | Bind address |
//! | `SX_HTTP_PORT` | `8000` | Bind port |
//! | `SX_CORS_ORIGINS` | `http://localhost:3000,http://localhost:3001` | JSON array or comma separated |
//! | `SX_REQUEST_TIMEOUT_SECS` | `90` | Per-request timeout |
//! | `SX_MAX_BODY_BYTES` | `65536` | Request body limit |
//! | `SX_SERVICE_NAME` | `stirixi-attestation` | Reported by `/health` |

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use thiserror::Error;

/// Main gateway configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub http: HttpConfig,
    pub cors: CorsConfig,
    pub limits: LimitsConfig,
    pub timeouts: TimeoutConfig,
    /// Name reported by `/health`
    pub service_name: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            cors: CorsConfig::default(),
            limits: LimitsConfig::default(),
            timeouts: TimeoutConfig::default(),
            service_name: "stirixi-attestation".to_string(),
        }
    }
}

impl GatewayConfig {
    /// Read configuration from the environment, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(host) = var("SX_HTTP_HOST") {
            config.http.host = host.parse().map_err(|_| ConfigError::InvalidValue {
                field: "SX_HTTP_HOST",
                value: host,
            })?;
        }
        if let Some(port) = var("SX_HTTP_PORT") {
            config.http.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                field: "SX_HTTP_PORT",
                value: port,
            })?;
        }
        if let Some(origins) = var("SX_CORS_ORIGINS") {
            config.cors.allowed_origins = parse_origins(&origins)?;
        }
        if let Some(secs) = var("SX_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| ConfigError::InvalidValue {
                field: "SX_REQUEST_TIMEOUT_SECS",
                value: secs,
            })?;
            config.timeouts.request = Duration::from_secs(secs);
        }
        if let Some(bytes) = var("SX_MAX_BODY_BYTES") {
            config.limits.max_body_bytes =
                bytes.parse().map_err(|_| ConfigError::InvalidValue {
                    field: "SX_MAX_BODY_BYTES",
                    value: bytes,
                })?;
        }
        if let Some(name) = var("SX_SERVICE_NAME") {
            config.service_name = name;
        }

        config.validate()?;
        Ok(config)
    }

    /// Loopback, ephemeral port, short timeout.
    pub fn for_testing() -> Self {
        Self {
            http: HttpConfig {
                host: IpAddr::V4(Ipv4Addr::LOCALHOST),
                port: 0,
            },
            timeouts: TimeoutConfig {
                request: Duration::from_secs(5),
            },
            ..Self::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.max_body_bytes == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_body_bytes cannot be 0".into(),
            ));
        }
        if self.timeouts.request.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "request timeout cannot be 0".into(),
            ));
        }
        Ok(())
    }

    /// Get HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8000,
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    /// Allowed origins; `*` mirrors any origin
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
    /// Preflight cache, seconds
    pub max_age: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:3001".to_string(),
            ],
            allow_credentials: true,
            max_age: 600,
        }
    }
}

/// Request validation limits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitsConfig {
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 64 * 1024,
        }
    }
}

/// Timeout configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Upper bound on waiting for a handler; covers the ledger round trip
    pub request: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request: Duration::from_secs(90),
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {field}: {value:?}")]
    InvalidValue { field: &'static str, value: String },

    #[error("invalid limit: {0}")]
    InvalidLimit(String),

    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
}

/// Parse `["a","b"]` or `a, b`. Blank input means no origins.
pub fn parse_origins(raw: &str) -> Result<Vec<String>, ConfigError> {
    let raw = raw.trim();
    if raw.starts_with('[') {
        return serde_json::from_str(raw).map_err(|_| ConfigError::InvalidValue {
            field: "SX_CORS_ORIGINS",
            value: raw.to_string(),
        });
    }
    Ok(raw
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect())
}

fn var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
