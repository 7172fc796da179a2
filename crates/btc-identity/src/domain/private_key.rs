//! # Private Keys
//!
//! A secp256k1 scalar in `[1, n - 1]` and the public key derived from it
//! when the private key is built.
//!
//! ## Security Properties
//!
//! - Scalar bytes are zeroized on drop
//! - Equality is constant-time
//! - `Debug` never prints the scalar
//! - Signing nonces are deterministic (RFC 6979), so signing needs no RNG

use super::bytes::{get_bytes, ByteInput};
use super::curve::{EllipticCurve, SCALAR_BYTES, SECP256K1};
use super::encoding::{base58check_decode, base58check_encode, u256_from_bytes, u256_to_bytes};
use super::errors::{EncodingError, Result};
use super::message::{encode_envelope, message_digest};
use super::network::Network;
use super::public_key::PublicKey;
use super::signature::Signature;
use k256::ecdsa::SigningKey;
use primitive_types::U256;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use std::fmt;
use subtle::ConstantTimeEq;
use tracing::debug;
use zeroize::Zeroize;

/// secp256k1 private key with its cached public key.
#[derive(Clone)]
pub struct PrivateKey {
    scalar: [u8; SCALAR_BYTES],
    public_key: PublicKey,
}

impl PrivateKey {
    /// Build from a scalar, rejecting 0 and values >= n.
    pub fn from_int(k: U256) -> Result<Self> {
        let point = SECP256K1.public_key(&k)?;
        Ok(Self {
            scalar: u256_to_bytes(&k),
            public_key: PublicKey::from_point(point)?,
        })
    }

    /// Build from a 32-byte big-endian scalar (raw or hex).
    pub fn from_bytes<'a>(input: impl Into<ByteInput<'a>>) -> Result<Self> {
        let bytes = get_bytes(input)?;
        if bytes.len() != SCALAR_BYTES {
            return Err(EncodingError::Length {
                expected: SCALAR_BYTES,
                actual: bytes.len(),
            }
            .into());
        }
        Self::from_int(u256_from_bytes(&bytes))
    }

    /// Build from 64 hex characters.
    pub fn from_hex(text: &str) -> Result<Self> {
        Self::from_bytes(text)
    }

    /// Decode a Base58Check (WIF) key from either network.
    pub fn from_base58check(text: &str) -> Result<Self> {
        Self::from_base58check_with_network(text).map(|(key, _)| key)
    }

    /// Decode a Base58Check (WIF) key, also returning its network.
    ///
    /// Only the uncompressed form (32-byte payload) is accepted.
    pub fn from_base58check_with_network(text: &str) -> Result<(Self, Network)> {
        let (version, mut payload) = base58check_decode(text)?;
        let decoded = Self::from_wif_payload(version, &payload);
        payload.zeroize();

        if let Err(ref err) = decoded {
            debug!(%err, version, "Rejected Base58Check private key");
        }
        decoded
    }

    fn from_wif_payload(version: u8, payload: &[u8]) -> Result<(Self, Network)> {
        let network = Network::from_private_key_version(version)?;
        if payload.len() != SCALAR_BYTES {
            return Err(EncodingError::PayloadLength {
                expected: SCALAR_BYTES,
                actual: payload.len(),
            }
            .into());
        }
        Ok((Self::from_bytes(payload)?, network))
    }

    /// Uniformly random key from the operating system RNG.
    pub fn from_random() -> Self {
        Self::from_rng(&mut OsRng)
    }

    /// Uniformly random key from `rng`.
    pub fn from_rng<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        loop {
            let mut scalar: [u8; SCALAR_BYTES] = SigningKey::random(&mut *rng).to_bytes().into();
            let key = Self::from_int(u256_from_bytes(&scalar));
            scalar.zeroize();

            if let Ok(key) = key {
                return key;
            }
        }
    }

    /// Derived public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Sign, returning `(r, s, recovery_id)`.
    ///
    /// With `hash_first` the message is SHA-256 hashed; otherwise it must
    /// already be a digest.
    pub fn raw_sign(&self, message: &[u8], hash_first: bool) -> Result<(U256, U256, u8)> {
        SECP256K1.sign(message, &self.to_u256(), hash_first)
    }

    /// Sign into a [`Signature`] carrying its recovery id.
    pub fn sign(&self, message: &[u8], hash_first: bool) -> Result<Signature> {
        let (r, s, recovery_id) = self.raw_sign(message, hash_first)?;
        Ok(Signature::new(r, s, Some(recovery_id)))
    }

    /// Base64 Bitcoin signed-message envelope, as produced by `signmessage`
    /// for an uncompressed key.
    pub fn sign_bitcoin_message(&self, message: &[u8]) -> Result<String> {
        let digest = message_digest(message)?;
        encode_envelope(&self.sign(&digest, true)?)
    }

    /// Base58Check (WIF) encoding for `network`.
    pub fn to_base58check(&self, network: Network) -> String {
        base58check_encode(network.private_key_version(), &self.scalar)
    }

    /// 32-byte big-endian scalar as hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.scalar)
    }

    /// 32-byte big-endian scalar.
    pub fn to_bytes(&self) -> [u8; SCALAR_BYTES] {
        self.scalar
    }

    /// Scalar as an integer.
    pub fn to_u256(&self) -> U256 {
        u256_from_bytes(&self.scalar)
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.scalar.ct_eq(&other.scalar).into()
    }
}

impl Eq for PrivateKey {}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("scalar", &"<redacted>")
            .field("public_key", &self.public_key)
            .finish()
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.scalar.zeroize();
    }
}
