//! # Attestation Node
//!
//! Library half of the `sx-node` binary: configuration and wiring, exposed so
//! the integration tests can assemble the same service graph against a mock
//! ledger.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from the environment
//! 2. Initialize logging and register metrics
//! 3. Resolve the signing identity and build the ledger client
//! 4. Load the engineer directory, open the score store
//! 5. Serve HTTP until Ctrl+C, draining in-flight requests

#![warn(clippy::all)]

pub mod config;
pub mod container;

pub use config::{NodeConfig, NodeConfigError, StorageConfig};
pub use container::{NodeError, ServiceContainer};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
