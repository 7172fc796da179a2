//! # secp256k1 Curve Facade
//!
//! The elliptic-curve arithmetic itself comes from the `k256` crate. This
//! module narrows it down to the handful of primitives the key types need,
//! expressed over fixed-width 256-bit integers.
//!
//! ## Digest convention
//!
//! When a message is "hashed first" the digest is a single SHA-256. Callers
//! that pre-hash (for example the Bitcoin signed-message flow) therefore end
//! up signing SHA-256(SHA-256(preimage)), which is what bitcoind expects.
//!
//! ## Malleability
//!
//! Signing always yields low-S signatures. Verification and recovery accept
//! high-S signatures too: `(r, s)` and `(r, n - s)` are both valid ECDSA
//! signatures and historical Bitcoin data contains the latter.

use super::encoding::{sha256, u256_from_bytes, u256_to_bytes, Hash};
use super::errors::{KeyError, RangeError, Result};
use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::{RecoveryId, Signature as K256Signature, SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::{AffinePoint, EncodedPoint};
use primitive_types::U256;
use std::borrow::Cow;
use zeroize::Zeroize;

/// Group order n.
/// n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
pub const N: U256 = U256([
    0xBFD2_5E8C_D036_4141,
    0xBAAE_DCE6_AF48_A03B,
    0xFFFF_FFFF_FFFF_FFFE,
    0xFFFF_FFFF_FFFF_FFFF,
]);

/// Field prime p.
/// p = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F
pub const P: U256 = U256([
    0xFFFF_FFFE_FFFF_FC2F,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
]);

/// Bit length of the group order.
pub const NLEN: usize = 256;

/// Byte length of a scalar or coordinate.
pub const SCALAR_BYTES: usize = NLEN / 8;

/// Base point G.
pub const G: CurvePoint = CurvePoint {
    x: U256([
        0x59F2_815B_16F8_1798,
        0x029B_FCDB_2DCE_28D9,
        0x55A0_6295_CE87_0B07,
        0x79BE_667E_F9DC_BBAC,
    ]),
    y: U256([
        0x9C47_D08F_FB10_D4B8,
        0xFD17_B448_A685_5419,
        0x5DA4_FBFC_0E11_08A8,
        0x483A_DA77_26A3_C465,
    ]),
};

/// Shared, read-only curve instance.
pub static SECP256K1: Secp256k1 = Secp256k1;

/// Affine point with 256-bit coordinates. Not validated by itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CurvePoint {
    /// x coordinate
    pub x: U256,
    /// y coordinate
    pub y: U256,
}

impl CurvePoint {
    /// Build a point from its coordinates.
    pub const fn new(x: U256, y: U256) -> Self {
        Self { x, y }
    }

    /// Uncompressed SEC form: `0x04 ∥ x ∥ y`.
    pub fn to_uncompressed(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[0] = 0x04;
        out[1..33].copy_from_slice(&u256_to_bytes(&self.x));
        out[33..].copy_from_slice(&u256_to_bytes(&self.y));
        out
    }

    /// Compressed SEC form: `(0x02 | parity(y)) ∥ x`.
    pub fn to_compressed(&self) -> [u8; 33] {
        let mut out = [0u8; 33];
        out[0] = 0x02 | u8::from(self.y.bit(0));
        out[1..].copy_from_slice(&u256_to_bytes(&self.x));
        out
    }
}

/// Primitives the key types require from the curve.
pub trait EllipticCurve: Send + Sync {
    /// Group order.
    fn order(&self) -> U256;

    /// Digest applied when a message is hashed before signing.
    fn digest(&self, message: &[u8]) -> Hash;

    /// k·G for a scalar in [1, n - 1].
    fn public_key(&self, k: &U256) -> Result<CurvePoint>;

    /// Whether the point satisfies the curve equation (and is not the identity).
    fn is_on_curve(&self, point: &CurvePoint) -> bool;

    /// Both y values for an x coordinate, even one first.
    fn y_from_x(&self, x: &U256) -> Option<[U256; 2]>;

    /// Sign, returning `(r, s, recovery_id)`.
    fn sign(&self, message: &[u8], k: &U256, hash_first: bool) -> Result<(U256, U256, u8)>;

    /// Verify `(r, s)` over `message` for `point`.
    fn verify(&self, message: &[u8], r: &U256, s: &U256, point: &CurvePoint, hash_first: bool)
        -> bool;

    /// Every `(point, recovery_id)` that `(r, s)` over `message` recovers to.
    fn recover_candidates(
        &self,
        message: &[u8],
        r: &U256,
        s: &U256,
        hash_first: bool,
    ) -> Vec<(CurvePoint, u8)>;
}

/// secp256k1 backed by `k256`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Secp256k1;

impl Secp256k1 {
    fn prehash<'m>(&self, message: &'m [u8], hash_first: bool) -> Cow<'m, [u8]> {
        if hash_first {
            Cow::Owned(self.digest(message).to_vec())
        } else {
            Cow::Borrowed(message)
        }
    }
}

impl EllipticCurve for Secp256k1 {
    fn order(&self) -> U256 {
        N
    }

    fn digest(&self, message: &[u8]) -> Hash {
        sha256(message)
    }

    fn public_key(&self, k: &U256) -> Result<CurvePoint> {
        let signing_key = signing_key(k)?;
        point_from_verifying_key(signing_key.verifying_key())
            .ok_or(KeyError::OutOfRange(RangeError::PrivateScalar))
    }

    fn is_on_curve(&self, point: &CurvePoint) -> bool {
        verifying_key(point).is_some()
    }

    fn y_from_x(&self, x: &U256) -> Option<[U256; 2]> {
        if *x >= P {
            return None;
        }

        let mut compressed = [0u8; 33];
        compressed[0] = 0x02;
        compressed[1..].copy_from_slice(&u256_to_bytes(x));

        let encoded = EncodedPoint::from_bytes(compressed).ok()?;
        let point: AffinePoint = Option::from(AffinePoint::from_encoded_point(&encoded))?;
        let uncompressed = point.to_encoded_point(false);
        let even = u256_from_bytes(uncompressed.y()?);

        Some([even, P - even])
    }

    fn sign(&self, message: &[u8], k: &U256, hash_first: bool) -> Result<(U256, U256, u8)> {
        let prehash = self.prehash(message, hash_first);
        let signing_key = signing_key(k)?;

        let (signature, recovery_id) = signing_key
            .sign_prehash_recoverable(&prehash)
            .map_err(|e| KeyError::SigningFailed(e.to_string()))?;

        let bytes = signature.to_bytes();
        Ok((
            u256_from_bytes(&bytes[..SCALAR_BYTES]),
            u256_from_bytes(&bytes[SCALAR_BYTES..]),
            recovery_id.to_byte(),
        ))
    }

    fn verify(
        &self,
        message: &[u8],
        r: &U256,
        s: &U256,
        point: &CurvePoint,
        hash_first: bool,
    ) -> bool {
        let (Some(key), Some(signature)) = (verifying_key(point), k256_signature(r, s)) else {
            return false;
        };
        let signature = signature.normalize_s().unwrap_or(signature);
        let prehash = self.prehash(message, hash_first);

        key.verify_prehash(&prehash, &signature).is_ok()
    }

    fn recover_candidates(
        &self,
        message: &[u8],
        r: &U256,
        s: &U256,
        hash_first: bool,
    ) -> Vec<(CurvePoint, u8)> {
        let Some(signature) = k256_signature(r, s) else {
            return Vec::new();
        };

        // Negating s mirrors R, so the y-parity bit of the id flips with it.
        let (signature, flipped) = match signature.normalize_s() {
            Some(normalized) => (normalized, true),
            None => (signature, false),
        };
        let prehash = self.prehash(message, hash_first);

        (0u8..4)
            .filter_map(|id| {
                let requested = RecoveryId::from_byte(id)?;
                let effective = if flipped {
                    RecoveryId::new(!requested.is_y_odd(), requested.is_x_reduced())
                } else {
                    requested
                };

                let key = VerifyingKey::recover_from_prehash(&prehash, &signature, effective).ok()?;
                point_from_verifying_key(&key).map(|point| (point, id))
            })
            .collect()
    }
}

/// Signing key for a scalar, rejecting 0 and values >= n.
fn signing_key(k: &U256) -> Result<SigningKey> {
    if k.is_zero() || *k >= N {
        return Err(RangeError::PrivateScalar.into());
    }

    let mut bytes = u256_to_bytes(k);
    let key = SigningKey::from_bytes((&bytes).into());
    bytes.zeroize();

    key.map_err(|_| RangeError::PrivateScalar.into())
}

fn verifying_key(point: &CurvePoint) -> Option<VerifyingKey> {
    if point.x >= P || point.y >= P {
        return None;
    }
    VerifyingKey::from_sec1_bytes(&point.to_uncompressed()).ok()
}

fn k256_signature(r: &U256, s: &U256) -> Option<K256Signature> {
    let mut bytes = [0u8; 64];
    bytes[..SCALAR_BYTES].copy_from_slice(&u256_to_bytes(r));
    bytes[SCALAR_BYTES..].copy_from_slice(&u256_to_bytes(s));
    K256Signature::from_slice(&bytes).ok()
}

fn point_from_verifying_key(key: &VerifyingKey) -> Option<CurvePoint> {
    let encoded = key.to_encoded_point(false);
    Some(CurvePoint::new(
        u256_from_bytes(encoded.x()?),
        u256_from_bytes(encoded.y()?),
    ))
}
