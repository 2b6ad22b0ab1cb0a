//! # Stirixi Attestation Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Wired node over a mock ledger, HTTP helpers
//! └── integration/
//!     ├── scenarios.rs  # Publish / list / latest acceptance scenarios
//!     ├── wire.rs       # Memo transaction contents
//!     └── persistence.rs# JSON-lines store across restarts
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p sx-tests
//! cargo test -p sx-tests integration::scenarios::
//! ```

pub mod fixtures;
pub mod integration;
