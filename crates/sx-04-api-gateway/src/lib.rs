//! # SX-04 API Gateway
//!
//! HTTP surface for score publication and queries.
//!
//! **Subsystem ID:** 04
//!
//! ## Routes
//!
//! | Method | Path | Success |
//! |--------|------|---------|
//! | `POST` | `/api/v1/engineers/{engineer_id}/scores` | 201 + record |
//! | `GET` | `/api/v1/engineers/{engineer_id}/scores?limit=N` | 200 + records, newest first |
//! | `GET` | `/api/v1/engineers/{engineer_id}/scores/latest` | 200 + record or `null` |
//! | `GET` | `/` | 200 + banner |
//! | `GET` | `/health` | 200 + status, issuer |
//! | `GET` | `/metrics` | 200 + Prometheus text |
//!
//! Errors are JSON `{"error": kind, "detail": message}`: 400 validation,
//! 404 unknown engineer, 413 oversized body, 502 ledger failure,
//! 504 request timeout, 500 anything else.
//!
//! ## Middleware Stack
//!
//! ```text
//! Request → CORS → Tracing → Timeout → BodyLimit → Handler
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use sx_04_api_gateway::{ApiGatewayService, GatewayConfig};
//!
//! let gateway = ApiGatewayService::new(GatewayConfig::from_env()?, scores)?;
//! gateway.run(shutdown_signal()).await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod middleware;
pub mod router;
pub mod service;

pub use domain::{
    ApiError, ConfigError, CorsConfig, ErrorBody, GatewayConfig, GatewayError, HttpConfig,
    LimitsConfig, TimeoutConfig,
};
pub use router::{build_router, AppState, ListQuery};
pub use service::ApiGatewayService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
