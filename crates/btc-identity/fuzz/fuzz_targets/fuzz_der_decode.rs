//! Fuzz target for the strict DER signature parser.
//!
//! ## Running
//!
//! ```bash
//! cd crates/btc-identity
//! cargo +nightly fuzz run fuzz_der_decode
//! ```

#![no_main]

use btc_identity::Signature;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Must never panic, whatever the input
    if let Ok(signature) = Signature::from_der(data) {
        // Anything accepted is canonical, so it re-encodes byte for byte
        assert_eq!(signature.to_der(), data);
    }
});
