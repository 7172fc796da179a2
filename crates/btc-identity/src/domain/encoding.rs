//! # Encoding Helpers
//!
//! Hash digests and text encodings shared by keys and signatures.
//!
//! - `hash160`: RIPEMD-160 of SHA-256
//! - Base58Check: `version ∥ payload ∥ first 4 bytes of SHA-256(SHA-256(version ∥ payload))`
//! - Base64: standard alphabet with padding

use super::errors::{EncodingError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use primitive_types::U256;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// 32-byte SHA-256 digest.
pub type Hash = [u8; 32];

/// 20-byte RIPEMD-160(SHA-256) digest.
pub type Hash160 = [u8; 20];

/// Single SHA-256.
pub fn sha256(data: &[u8]) -> Hash {
    Sha256::digest(data).into()
}

/// SHA-256 applied twice.
pub fn double_sha256(data: &[u8]) -> Hash {
    sha256(&sha256(data))
}

/// RIPEMD-160 of the SHA-256 digest.
pub fn hash160(data: &[u8]) -> Hash160 {
    Ripemd160::digest(sha256(data)).into()
}

/// Base58Check-encode `version ∥ payload`.
pub fn base58check_encode(version: u8, payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(1 + payload.len());
    data.push(version);
    data.extend_from_slice(payload);
    bs58::encode(data).with_check().into_string()
}

/// Decode Base58Check text, verifying the checksum.
///
/// Returns `(version, payload)`.
pub fn base58check_decode(text: &str) -> Result<(u8, Vec<u8>)> {
    let mut data = bs58::decode(text.trim())
        .with_check(None)
        .into_vec()
        .map_err(|e| EncodingError::Base58Check(e.to_string()))?;

    if data.is_empty() {
        return Err(EncodingError::Base58Check("missing version byte".to_string()).into());
    }

    let version = data.remove(0);
    Ok((version, data))
}

/// Standard Base64 with padding.
pub fn base64_encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decode standard Base64.
pub fn base64_decode(text: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(text.trim())
        .map_err(|e| EncodingError::Base64(e.to_string()).into())
}

/// 32-byte big-endian form of a 256-bit value.
pub fn u256_to_bytes(value: &U256) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    value.to_big_endian(&mut bytes);
    bytes
}

/// Interpret up to 32 big-endian bytes as a 256-bit value.
///
/// Callers must ensure `bytes.len() <= 32`.
pub fn u256_from_bytes(bytes: &[u8]) -> U256 {
    U256::from_big_endian(bytes)
}

/// Minimal big-endian bytes of a value, at least one byte.
pub fn u256_to_minimal_bytes(value: &U256) -> Vec<u8> {
    let bytes = u256_to_bytes(value);
    let skip = bytes.iter().take_while(|&&b| b == 0).count().min(31);
    bytes[skip..].to_vec()
}
