//! # Key Errors
//!
//! Error types for key, signature and encoding operations.
//!
//! Every decoder fails with a specific reason. "No result" outcomes
//! (unknown SEC prefix, no matching recovery candidate) are `Ok(None)`,
//! never an error.

use thiserror::Error;

/// Crate result alias.
pub type Result<T> = std::result::Result<T, KeyError>;

/// Errors that can occur while constructing, decoding or using keys.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyError {
    /// Input bytes or text are malformed
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(#[from] EncodingError),

    /// A scalar, signature component or version byte is outside its domain
    #[error("Value out of range: {0}")]
    OutOfRange(#[from] RangeError),

    /// The (x, y) pair does not satisfy y^2 = x^3 + 7 over the field
    #[error("Point is not on the secp256k1 curve")]
    PointNotOnCurve,

    /// Public key recovery could not run or produced no key
    #[error("Public key recovery unavailable: {0}")]
    RecoveryUnavailable(RecoveryFailure),

    /// The signed-message length prefix is a single byte
    #[error("Message too long for a Bitcoin signed message: {len} bytes (max 255)")]
    MessageTooLong { len: usize },

    /// The signing primitive rejected its input
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// Batch exceeds the configured maximum
    #[error("Batch too large: {size} requests (max {max})")]
    BatchTooLarge { size: usize, max: usize },

    /// Configuration value rejected during validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Malformed input encodings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EncodingError {
    /// Empty byte sequence where at least a prefix byte is required
    #[error("empty input")]
    Empty,

    /// Text is not valid hexadecimal
    #[error("invalid hex: {0}")]
    Hex(String),

    /// Text is not valid Base64
    #[error("invalid base64: {0}")]
    Base64(String),

    /// Base58 alphabet or checksum failure
    #[error("invalid base58check: {0}")]
    Base58Check(String),

    /// Base58Check payload has the wrong size
    #[error("invalid base58check payload length: expected {expected}, got {actual}")]
    PayloadLength { expected: usize, actual: usize },

    /// SEC public key byte stream has the wrong length for its prefix
    #[error("SEC key with prefix {prefix:#04x} must be {expected} bytes, got {actual}")]
    SecLength {
        prefix: u8,
        expected: usize,
        actual: usize,
    },

    /// Fixed-width signature or envelope has the wrong length
    #[error("expected {expected} bytes, got {actual}")]
    Length { expected: usize, actual: usize },

    /// Strict DER signature rejection
    #[error("DER signature: {0}")]
    Der(#[from] DerError),
}

/// Specific reasons a DER signature is rejected.
///
/// Each check of the strict parser maps to exactly one variant.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum DerError {
    #[error("too short ({0} bytes, minimum 8)")]
    TooShort(usize),

    #[error("wrong sequence tag {0:#04x} (expected 0x30)")]
    WrongSequenceTag(u8),

    #[error("length mismatch: declared {declared}, remaining {remaining}")]
    LengthMismatch { declared: usize, remaining: usize },

    #[error("no INTEGER marker for r")]
    MissingRMarker,

    #[error("incorrect r length {0}")]
    InvalidRLength(usize),

    #[error("r is negative")]
    NegativeR,

    #[error("r is excessively padded")]
    ExcessivelyPaddedR,

    #[error("no INTEGER marker for s")]
    MissingSMarker,

    #[error("incorrect s length {0}")]
    InvalidSLength(usize),

    #[error("{0} trailing bytes after s")]
    TrailingBytes(usize),

    #[error("s is negative")]
    NegativeS,

    #[error("s is excessively padded")]
    ExcessivelyPaddedS,

    #[error("r is not between 1 and n - 1")]
    ROutOfRange,

    #[error("s is not between 1 and n - 1")]
    SOutOfRange,
}

/// Range violations.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum RangeError {
    /// Private scalar is zero or not below the group order
    #[error("private key scalar must be in [1, n - 1]")]
    PrivateScalar,

    /// Base58Check version byte is not a known private-key version
    #[error("unrecognized private key version byte {0:#04x}")]
    UnknownVersion(u8),
}

/// Why public key recovery failed.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum RecoveryFailure {
    /// The signature carries no recovery id
    #[error("signature has no recovery id")]
    MissingRecoveryId,

    /// Recovery id is not 0..=3
    #[error("recovery id {0} out of range")]
    InvalidRecoveryId(u8),

    /// r or s is outside [1, n - 1]
    #[error("signature components out of range")]
    InvalidSignature,

    /// Signed-message magic byte is not 27..=30
    #[error("unsupported magic byte {0}")]
    UnsupportedMagic(u8),

    /// No candidate key matched the recovery id
    #[error("no candidate key matches the recovery id")]
    NoCandidate,
}

impl From<DerError> for KeyError {
    fn from(err: DerError) -> Self {
        KeyError::InvalidEncoding(EncodingError::Der(err))
    }
}

impl From<RecoveryFailure> for KeyError {
    fn from(failure: RecoveryFailure) -> Self {
        KeyError::RecoveryUnavailable(failure)
    }
}
