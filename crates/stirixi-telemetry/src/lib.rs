//! # Stirixi Telemetry
//!
//! Observability for the attestation node.
//!
//! ## Components
//!
//! - **Logs**: `tracing` subscriber with an env filter and either a JSON or a
//!   human-readable formatter
//! - **Metrics**: Prometheus registry for publication and anchoring outcomes,
//!   scraped from the gateway's `/metrics` route
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stirixi_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let _guard = init_telemetry(&TelemetryConfig::from_env()).expect("telemetry");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SX_SERVICE_NAME` | `stirixi-attestation` | Service name in logs |
//! | `SX_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `SX_JSON_LOGS` | `false` (`true` in containers) | JSON formatted logs |

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{
    encode_metrics, register_metrics, HistogramTimer, ANCHOR_DURATION, ANCHOR_SUBMISSIONS,
    HTTP_RESPONSES, SCORE_PUBLICATIONS,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize log subscriber: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),
}

/// Initialize logging and register all metrics.
///
/// Returns a guard that should be held for the lifetime of the application.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    register_metrics()?;
    init_logging(config)?;

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "Telemetry initialized"
    );

    Ok(TelemetryGuard {
        service_name: config.service_name.clone(),
    })
}

/// Guard that keeps telemetry active; logs on shutdown.
pub struct TelemetryGuard {
    service_name: String,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry...");
    }
}
