//! Fuzz target for SEC public key decoding.

#![no_main]

use btc_identity::PublicKey;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(Some(key)) = PublicKey::from_bytes(data) {
        // Both serializations decode back to the same key
        let compressed = key.compressed_bytes();
        let uncompressed = key.to_bytes();
        assert_eq!(PublicKey::from_bytes(&compressed).ok().flatten(), Some(key));
        assert_eq!(PublicKey::from_bytes(&uncompressed).ok().flatten(), Some(key));
    }
});
