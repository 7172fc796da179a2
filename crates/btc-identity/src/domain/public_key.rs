//! # Public Keys
//!
//! A validated secp256k1 point with both of its hash160 digests computed at
//! construction.
//!
//! ## Decoding outcomes
//!
//! | Input | Result |
//! |-------|--------|
//! | `0x04 ∥ x ∥ y` (65 bytes) on the curve | `Ok(Some(key))` |
//! | `0x02/0x03 ∥ x` (33 bytes) with a valid x | `Ok(Some(key))` |
//! | Any other prefix byte | `Ok(None)` |
//! | Wrong length, off-curve point, empty input | `Err(..)` |

use super::bytes::{get_bytes, ByteInput};
use super::curve::{CurvePoint, EllipticCurve, N, SCALAR_BYTES, SECP256K1};
use super::encoding::{
    base58check_encode, base64_decode, base64_encode, hash160, u256_from_bytes, u256_to_bytes,
    Hash160,
};
use super::errors::{EncodingError, KeyError, RecoveryFailure, Result};
use super::message::{decode_envelope, message_digest};
use super::network::Network;
use super::private_key::PrivateKey;
use super::signature::Signature;
use primitive_types::{U256, U512};
use tracing::debug;

/// SEC prefix of an uncompressed point.
pub const SEC_UNCOMPRESSED: u8 = 0x04;
/// SEC prefix of a compressed point with even y.
pub const SEC_COMPRESSED_EVEN: u8 = 0x02;
/// SEC prefix of a compressed point with odd y.
pub const SEC_COMPRESSED_ODD: u8 = 0x03;

/// Length of the uncompressed SEC form.
pub const UNCOMPRESSED_LEN: usize = 1 + 2 * SCALAR_BYTES;
/// Length of the compressed SEC form.
pub const COMPRESSED_LEN: usize = 1 + SCALAR_BYTES;

/// secp256k1 public key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PublicKey {
    point: CurvePoint,
    hash160_uncompressed: Hash160,
    hash160_compressed: Hash160,
}

impl PublicKey {
    /// Validate `point` and cache its digests.
    pub fn from_point(point: CurvePoint) -> Result<Self> {
        if !SECP256K1.is_on_curve(&point) {
            return Err(KeyError::PointNotOnCurve);
        }

        Ok(Self {
            point,
            hash160_uncompressed: hash160(&point.to_uncompressed()),
            hash160_compressed: hash160(&point.to_compressed()),
        })
    }

    /// Decode a SEC-encoded key. Unknown prefixes yield `Ok(None)`.
    pub fn from_bytes<'a>(input: impl Into<ByteInput<'a>>) -> Result<Option<Self>> {
        let bytes = get_bytes(input)?;
        let Some(&prefix) = bytes.first() else {
            return Err(EncodingError::Empty.into());
        };

        match prefix {
            SEC_UNCOMPRESSED => {
                expect_len(prefix, UNCOMPRESSED_LEN, bytes.len())?;
                let x = u256_from_bytes(&bytes[1..1 + SCALAR_BYTES]);
                let y = u256_from_bytes(&bytes[1 + SCALAR_BYTES..]);
                Self::from_point(CurvePoint::new(x, y)).map(Some)
            }
            SEC_COMPRESSED_EVEN | SEC_COMPRESSED_ODD => {
                expect_len(prefix, COMPRESSED_LEN, bytes.len())?;
                let x = u256_from_bytes(&bytes[1..]);
                let [even, odd] = SECP256K1.y_from_x(&x).ok_or(KeyError::PointNotOnCurve)?;
                let y = if prefix == SEC_COMPRESSED_ODD { odd } else { even };
                Self::from_point(CurvePoint::new(x, y)).map(Some)
            }
            other => {
                debug!(prefix = other, "Unrecognized SEC prefix");
                Ok(None)
            }
        }
    }

    /// Decode Base64 of a SEC-encoded key.
    pub fn from_base64(text: &str) -> Result<Option<Self>> {
        Self::from_bytes(&base64_decode(text)?)
    }

    /// Unpack `x ∥ y` from a 512-bit integer.
    pub fn from_int(value: U512) -> Result<Self> {
        let mut bytes = [0u8; 2 * SCALAR_BYTES];
        value.to_big_endian(&mut bytes);
        Self::from_point(CurvePoint::new(
            u256_from_bytes(&bytes[..SCALAR_BYTES]),
            u256_from_bytes(&bytes[SCALAR_BYTES..]),
        ))
    }

    /// Public half of `private_key`.
    pub fn from_private_key(private_key: &PrivateKey) -> Self {
        *private_key.public_key()
    }

    /// Recover the key that produced `signature` over `message`.
    ///
    /// `message` (raw bytes or hex text) is hashed before recovery. Fails
    /// when the message is bad hex, the signature has no recovery id or its
    /// components are out of range; returns `Ok(None)` when no candidate
    /// carries the requested recovery id.
    pub fn from_signature<'a>(
        message: impl Into<ByteInput<'a>>,
        signature: &Signature,
    ) -> Result<Option<Self>> {
        let message = get_bytes(message)?;
        let recovery_id = signature
            .recovery_id()
            .ok_or(RecoveryFailure::MissingRecoveryId)?;

        let (r, s) = (signature.r(), signature.s());
        if !in_scalar_range(&r) || !in_scalar_range(&s) {
            return Err(RecoveryFailure::InvalidSignature.into());
        }

        SECP256K1
            .recover_candidates(&message, &r, &s, true)
            .into_iter()
            .find(|(_, id)| *id == recovery_id)
            .map(|(point, _)| Self::from_point(point))
            .transpose()
    }

    /// Recover the signer of a Base64 Bitcoin signed-message envelope.
    ///
    /// Failing to recover any key is an error here, not `None`.
    pub fn recover_bitcoin_message(message: &[u8], signature: &str) -> Result<Self> {
        let signature = decode_envelope(signature)?;
        let digest = message_digest(message)?;

        Self::from_signature(&digest, &signature)?
            .ok_or(KeyError::RecoveryUnavailable(RecoveryFailure::NoCandidate))
    }

    /// Verify a Base64 Bitcoin signed-message envelope against the key it
    /// recovers to.
    pub fn verify_bitcoin_message(message: &[u8], signature: &str) -> Result<bool> {
        Self::recover_bitcoin_message(message, signature)?.verify_signed_message(message, signature)
    }

    /// Verify a Base64 Bitcoin signed-message envelope against this key.
    pub fn verify_signed_message(&self, message: &[u8], signature: &str) -> Result<bool> {
        let signature = decode_envelope(signature)?;
        Ok(self.verify(&message_digest(message)?, &signature, true))
    }

    /// Cached hash160 of the compressed or uncompressed form.
    pub fn hash160(&self, compressed: bool) -> Hash160 {
        if compressed {
            self.hash160_compressed
        } else {
            self.hash160_uncompressed
        }
    }

    /// P2PKH address.
    pub fn address(&self, compressed: bool, network: Network) -> String {
        base58check_encode(network.address_version(), &self.hash160(compressed))
    }

    /// Verify `signature` over `message` (raw bytes or hex text). A mismatch
    /// or undecodable hex is `false`, never an error.
    pub fn verify<'a>(
        &self,
        message: impl Into<ByteInput<'a>>,
        signature: &Signature,
        hash_first: bool,
    ) -> bool {
        let Ok(message) = get_bytes(message) else {
            return false;
        };
        SECP256K1.verify(
            &message,
            &signature.r(),
            &signature.s(),
            &self.point,
            hash_first,
        )
    }

    /// Underlying curve point.
    pub fn point(&self) -> &CurvePoint {
        &self.point
    }

    /// Compressed SEC form.
    pub fn compressed_bytes(&self) -> [u8; COMPRESSED_LEN] {
        self.point.to_compressed()
    }

    /// Uncompressed SEC form.
    pub fn to_bytes(&self) -> [u8; UNCOMPRESSED_LEN] {
        self.point.to_uncompressed()
    }

    /// Hex of the uncompressed SEC form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Base64 of the uncompressed SEC form.
    pub fn to_base64(&self) -> String {
        base64_encode(&self.to_bytes())
    }

    /// `x ∥ y` packed into a 512-bit integer.
    pub fn to_u512(&self) -> U512 {
        let mut bytes = [0u8; 2 * SCALAR_BYTES];
        bytes[..SCALAR_BYTES].copy_from_slice(&u256_to_bytes(&self.point.x));
        bytes[SCALAR_BYTES..].copy_from_slice(&u256_to_bytes(&self.point.y));
        U512::from_big_endian(&bytes)
    }
}

fn expect_len(prefix: u8, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(EncodingError::SecLength {
            prefix,
            expected,
            actual,
        }
        .into())
    }
}

fn in_scalar_range(value: &U256) -> bool {
    !value.is_zero() && *value < N
}
