//! Prometheus metrics for the attestation node.
//!
//! All metrics follow the naming convention: `sx_<area>_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: publication and anchoring outcomes, HTTP responses
//! - **Histogram**: anchoring round-trip latency

use lazy_static::lazy_static;
use prometheus::{CounterVec, Encoder, Histogram, HistogramOpts, Opts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // SCORE RECORDS (Subsystem 3)
    // =========================================================================

    /// Publication attempts by outcome
    pub static ref SCORE_PUBLICATIONS: CounterVec = CounterVec::new(
        Opts::new("sx_score_publications_total", "Score publication attempts by outcome"),
        &["outcome"]  // anchored / validation / not_found / upstream / internal
    ).expect("metric creation failed");

    // =========================================================================
    // LEDGER ANCHOR (Subsystem 2)
    // =========================================================================

    /// Anchor submissions by outcome
    pub static ref ANCHOR_SUBMISSIONS: CounterVec = CounterVec::new(
        Opts::new("sx_anchor_submissions_total", "Ledger anchor submissions by outcome"),
        &["outcome"]  // confirmed / rejected / empty_signature / failed / timeout
    ).expect("metric creation failed");

    /// Time from blockhash fetch to confirmed signature
    pub static ref ANCHOR_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "sx_anchor_duration_seconds",
            "Time spent anchoring a payload on the ledger"
        ).buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 40.0])
    ).expect("metric creation failed");

    // =========================================================================
    // API GATEWAY (Subsystem 4)
    // =========================================================================

    /// HTTP responses by status code
    pub static ref HTTP_RESPONSES: CounterVec = CounterVec::new(
        Opts::new("sx_http_responses_total", "HTTP responses by status code"),
        &["status"]
    ).expect("metric creation failed");
}

/// Register every metric with [`REGISTRY`]. Safe to call more than once.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(SCORE_PUBLICATIONS.clone()),
        Box::new(ANCHOR_SUBMISSIONS.clone()),
        Box::new(ANCHOR_DURATION.clone()),
        Box::new(HTTP_RESPONSES.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }
    Ok(())
}

/// Render the registry in the Prometheus text exposition format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Observes elapsed time into a histogram when dropped.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}
