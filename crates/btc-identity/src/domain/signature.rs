//! # ECDSA Signatures
//!
//! `(r, s)` pair with an optional recovery id, plus its encodings:
//!
//! | Form | Layout |
//! |------|--------|
//! | DER | `0x30 len 0x02 len(r) r 0x02 len(s) s` |
//! | Fixed-width | `r(32) ∥ s(32)` |
//! | Text | hex or Base64 of the fixed-width form |
//!
//! ## Security Notes
//!
//! - **Strict DER**: every malformed encoding is rejected with its own
//!   [`DerError`]; nothing is coerced.
//! - **Range validation** happens when decoding DER. The in-memory
//!   constructor stores whatever it is given.

use super::bytes::{get_bytes, ByteInput};
use super::curve::{N, SCALAR_BYTES};
use super::encoding::{
    base64_decode, base64_encode, u256_from_bytes, u256_to_bytes, u256_to_minimal_bytes,
};
use super::errors::{DerError, EncodingError, Result};
use primitive_types::U256;
use tracing::debug;

/// DER SEQUENCE tag.
const DER_SEQUENCE: u8 = 0x30;

/// DER INTEGER tag.
const DER_INTEGER: u8 = 0x02;

/// Shortest possible DER signature: both integers one byte long.
const DER_MIN_LEN: usize = 8;

/// Length of the fixed-width form.
pub const SIGNATURE_BYTES: usize = 2 * SCALAR_BYTES;

/// ECDSA signature on secp256k1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature {
    r: U256,
    s: U256,
    recovery_id: Option<u8>,
}

impl Signature {
    /// Store `(r, s)` and an optional recovery id as-is.
    pub fn new(r: U256, s: U256, recovery_id: Option<u8>) -> Self {
        Self { r, s, recovery_id }
    }

    /// r component.
    pub fn r(&self) -> U256 {
        self.r
    }

    /// s component.
    pub fn s(&self) -> U256 {
        self.s
    }

    /// Recovery id, if known.
    pub fn recovery_id(&self) -> Option<u8> {
        self.recovery_id
    }

    /// Same `(r, s)` with the given recovery id.
    pub fn with_recovery_id(self, recovery_id: u8) -> Self {
        Self {
            recovery_id: Some(recovery_id),
            ..self
        }
    }

    /// Whether s is in the lower half of the group order.
    pub fn is_low_s(&self) -> bool {
        self.s <= N >> 1
    }

    /// Decode a strict DER signature.
    pub fn from_der<'a>(der: impl Into<ByteInput<'a>>) -> Result<Self> {
        let bytes = get_bytes(der)?;
        parse_der(&bytes).map_err(|reason| {
            debug!(%reason, len = bytes.len(), "Rejected DER signature");
            reason.into()
        })
    }

    /// Canonical DER encoding.
    pub fn to_der(&self) -> Vec<u8> {
        let r = der_integer(&self.r);
        let s = der_integer(&self.s);

        let mut der = Vec::with_capacity(6 + r.len() + s.len());
        der.push(DER_SEQUENCE);
        der.push((4 + r.len() + s.len()) as u8);
        der.push(DER_INTEGER);
        der.push(r.len() as u8);
        der.extend_from_slice(&r);
        der.push(DER_INTEGER);
        der.push(s.len() as u8);
        der.extend_from_slice(&s);
        der
    }

    /// Decode the fixed-width `r ∥ s` form (exactly 64 bytes).
    pub fn from_bytes<'a>(input: impl Into<ByteInput<'a>>) -> Result<Self> {
        let bytes = get_bytes(input)?;
        if bytes.len() != SIGNATURE_BYTES {
            return Err(EncodingError::Length {
                expected: SIGNATURE_BYTES,
                actual: bytes.len(),
            }
            .into());
        }

        Ok(Self::new(
            u256_from_bytes(&bytes[..SCALAR_BYTES]),
            u256_from_bytes(&bytes[SCALAR_BYTES..]),
            None,
        ))
    }

    /// Fixed-width `r ∥ s` form.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_BYTES] {
        let mut out = [0u8; SIGNATURE_BYTES];
        out[..SCALAR_BYTES].copy_from_slice(&u256_to_bytes(&self.r));
        out[SCALAR_BYTES..].copy_from_slice(&u256_to_bytes(&self.s));
        out
    }

    /// Decode Base64 of the fixed-width form.
    pub fn from_base64(text: &str) -> Result<Self> {
        Self::from_bytes(&base64_decode(text)?)
    }

    /// Base64 of the fixed-width form.
    pub fn to_base64(&self) -> String {
        base64_encode(&self.to_bytes())
    }

    /// Decode hex of the fixed-width form.
    pub fn from_hex(text: &str) -> Result<Self> {
        Self::from_bytes(text)
    }

    /// Hex of the fixed-width form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

/// Minimal big-endian integer, zero-prefixed when the high bit is set.
fn der_integer(value: &U256) -> Vec<u8> {
    let mut bytes = u256_to_minimal_bytes(value);
    if bytes[0] & 0x80 != 0 {
        bytes.insert(0, 0x00);
    }
    bytes
}

fn parse_der(d: &[u8]) -> std::result::Result<Signature, DerError> {
    if d.len() < DER_MIN_LEN {
        return Err(DerError::TooShort(d.len()));
    }
    if d[0] != DER_SEQUENCE {
        return Err(DerError::WrongSequenceTag(d[0]));
    }

    let declared = d[1] as usize;
    if declared != d.len() - 2 {
        return Err(DerError::LengthMismatch {
            declared,
            remaining: d.len() - 2,
        });
    }

    // r
    if d[2] != DER_INTEGER {
        return Err(DerError::MissingRMarker);
    }
    let r_len = d[3] as usize;
    if r_len == 0 || r_len > d.len() - 7 {
        return Err(DerError::InvalidRLength(r_len));
    }
    let r_end = 4 + r_len;
    let r_bytes = &d[4..r_end];
    check_integer(r_bytes, DerError::NegativeR, DerError::ExcessivelyPaddedR)?;

    // s
    if d.get(r_end) != Some(&DER_INTEGER) {
        return Err(DerError::MissingSMarker);
    }
    let s_start = r_end + 2;
    let s_len = match d.get(r_end + 1) {
        Some(&len) if s_start <= d.len() => len as usize,
        _ => return Err(DerError::InvalidSLength(0)),
    };
    let remaining = d.len() - s_start;
    if s_len == 0 || s_len > remaining {
        return Err(DerError::InvalidSLength(s_len));
    }
    if s_len < remaining {
        return Err(DerError::TrailingBytes(remaining - s_len));
    }
    let s_bytes = &d[s_start..s_start + s_len];
    check_integer(s_bytes, DerError::NegativeS, DerError::ExcessivelyPaddedS)?;

    let r = scalar_in_range(r_bytes).ok_or(DerError::ROutOfRange)?;
    let s = scalar_in_range(s_bytes).ok_or(DerError::SOutOfRange)?;

    Ok(Signature::new(r, s, None))
}

/// Reject negative encodings and redundant leading zeros.
fn check_integer(
    bytes: &[u8],
    negative: DerError,
    padded: DerError,
) -> std::result::Result<(), DerError> {
    if bytes[0] & 0x80 != 0 {
        return Err(negative);
    }
    if bytes.len() > 1 && bytes[0] == 0x00 && bytes[1] & 0x80 == 0 {
        return Err(padded);
    }
    Ok(())
}

/// Big-endian value in [1, n - 1], or `None`.
fn scalar_in_range(bytes: &[u8]) -> Option<U256> {
    let significant = &bytes[bytes.iter().take_while(|&&b| b == 0).count()..];
    if significant.len() > SCALAR_BYTES {
        return None;
    }

    let value = u256_from_bytes(significant);
    (!value.is_zero() && value < N).then_some(value)
}
