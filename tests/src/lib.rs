//! # Bitcoin Identity Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Criterion benchmarks for signing, DER and recovery
//! │   └── identity.rs
//! │
//! └── integration/      # End-to-end flows
//!     ├── flows.rs      # Wallet flows through KeyIdentityService
//!     └── interop.rs    # Cross-checks against k256 directly
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p btc-identity-tests
//!
//! # With logs
//! RUST_LOG=btc_identity=debug cargo test -p btc-identity-tests -- --nocapture
//!
//! # Benchmarks
//! cargo bench -p btc-identity-tests
//! ```

pub mod integration;

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Install a test-friendly `tracing` subscriber once per process.
///
/// Honors `RUST_LOG`; defaults to `warn`.
pub fn init_test_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
