//! Fuzz target for Bitcoin signed-message verification.

#![no_main]

use btc_identity::PublicKey;
use libfuzzer_sys::fuzz_target;

/// Fuzz input for signed-message verification.
#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzInput {
    message: Vec<u8>,
    /// Base64 envelope text, usually malformed
    envelope: String,
    /// Raw envelope bytes, encoded before verifying
    raw_envelope: [u8; 65],
}

fuzz_target!(|input: FuzzInput| {
    let _ = PublicKey::verify_bitcoin_message(&input.message, &input.envelope);

    let encoded = btc_identity::domain::encoding::base64_encode(&input.raw_envelope);
    let first = PublicKey::verify_bitcoin_message(&input.message, &encoded);
    let second = PublicKey::verify_bitcoin_message(&input.message, &encoded);
    assert_eq!(first, second);
});
