//! # Bitcoin Signed Message
//!
//! The `signmessage`/`verifymessage` convention:
//!
//! ```text
//! preimage = 0x18 ∥ "Bitcoin Signed Message:\n" ∥ len(message) ∥ message
//! envelope = base64(magic ∥ r(32) ∥ s(32)),  magic = 27 + recovery_id
//! ```
//!
//! The length prefix is a single byte, so messages of 256 bytes or more are
//! rejected. Only uncompressed-key magics (27..=30) are produced or accepted.

use super::encoding::{base64_decode, base64_encode, sha256, Hash};
use super::errors::{EncodingError, KeyError, RecoveryFailure, Result};
use super::signature::{Signature, SIGNATURE_BYTES};

/// Magic header shared by every signed message.
pub const MESSAGE_MAGIC: &[u8] = b"\x18Bitcoin Signed Message:\n";

/// Magic byte for recovery id 0 of an uncompressed key.
pub const MAGIC_BASE: u8 = 27;

/// Highest recovery id an uncompressed-key magic can carry.
const MAX_RECOVERY_ID: u8 = 3;

/// Largest message the single length byte can describe.
pub const MAX_MESSAGE_LEN: usize = u8::MAX as usize;

/// Envelope length before Base64: magic plus fixed-width signature.
pub const ENVELOPE_BYTES: usize = 1 + SIGNATURE_BYTES;

/// Exact byte string that gets hashed and signed.
pub fn message_preimage(message: &[u8]) -> Result<Vec<u8>> {
    if message.len() > MAX_MESSAGE_LEN {
        return Err(KeyError::MessageTooLong { len: message.len() });
    }

    let mut preimage = Vec::with_capacity(MESSAGE_MAGIC.len() + 1 + message.len());
    preimage.extend_from_slice(MESSAGE_MAGIC);
    preimage.push(message.len() as u8);
    preimage.extend_from_slice(message);
    Ok(preimage)
}

/// SHA-256 of the preimage. The curve layer hashes this once more when
/// signing, giving the double SHA-256 bitcoind signs.
pub fn message_digest(message: &[u8]) -> Result<Hash> {
    Ok(sha256(&message_preimage(message)?))
}

/// Base64 envelope for a signature carrying a recovery id.
pub fn encode_envelope(signature: &Signature) -> Result<String> {
    let recovery_id = signature
        .recovery_id()
        .ok_or(RecoveryFailure::MissingRecoveryId)?;
    if recovery_id > MAX_RECOVERY_ID {
        return Err(RecoveryFailure::InvalidRecoveryId(recovery_id).into());
    }

    let mut envelope = Vec::with_capacity(ENVELOPE_BYTES);
    envelope.push(MAGIC_BASE + recovery_id);
    envelope.extend_from_slice(&signature.to_bytes());
    Ok(base64_encode(&envelope))
}

/// Decode a Base64 envelope into a signature with its recovery id set.
pub fn decode_envelope(text: &str) -> Result<Signature> {
    let envelope = base64_decode(text)?;
    if envelope.len() != ENVELOPE_BYTES {
        return Err(EncodingError::Length {
            expected: ENVELOPE_BYTES,
            actual: envelope.len(),
        }
        .into());
    }

    let magic = envelope[0];
    let recovery_id = magic
        .checked_sub(MAGIC_BASE)
        .filter(|id| *id <= MAX_RECOVERY_ID)
        .ok_or(RecoveryFailure::UnsupportedMagic(magic))?;

    Ok(Signature::from_bytes(&envelope[1..])?.with_recovery_id(recovery_id))
}
