//! # Bitcoin Key Identity
//!
//! secp256k1 key pairs, addresses and signatures in the exact encodings
//! Bitcoin software exchanges.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): keys, signatures and encodings, no I/O
//! - **Ports Layer** (`ports/`): the `KeyIdentityApi` trait
//! - **Service Layer** (`service.rs`): configuration-aware implementation
//!
//! ## Encodings
//!
//! | Type | Encodings |
//! |------|-----------|
//! | [`PrivateKey`] | integer, 32 bytes, hex, Base58Check (WIF) |
//! | [`PublicKey`] | SEC compressed/uncompressed, hex, Base64, 512-bit integer, P2PKH address |
//! | [`Signature`] | strict DER, fixed-width `r ∥ s`, hex, Base64 |
//! | Signed message | Base64 of `magic ∥ r ∥ s` |
//!
//! ## Security Notes
//!
//! - **Strict DER**: non-canonical encodings are rejected with a named reason
//! - **Validated construction**: out-of-range scalars and off-curve points
//!   never produce a key
//! - **Secret hygiene**: private scalars are zeroized on drop and compared in
//!   constant time
//!
//! ## Example
//!
//! ```
//! use btc_identity::{Network, PrivateKey, PublicKey};
//!
//! let key = PrivateKey::from_hex(
//!     "0000000000000000000000000000000000000000000000000000000000000001",
//! )
//! .unwrap();
//! assert_eq!(
//!     key.public_key().address(true, Network::Mainnet),
//!     "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH"
//! );
//!
//! let envelope = key.sign_bitcoin_message(b"hello").unwrap();
//! assert!(PublicKey::verify_bitcoin_message(b"hello", &envelope).unwrap());
//! ```

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::bytes::{get_bytes, ByteInput};
pub use domain::config::{IdentityConfig, IdentityConfigBuilder};
pub use domain::curve::{CurvePoint, EllipticCurve, Secp256k1, G, N, SECP256K1};
pub use domain::encoding::{double_sha256, hash160, sha256, Hash, Hash160};
pub use domain::entities::{
    BatchVerificationRequest, BatchVerificationResult, MessageVerification, VerificationRequest,
    VerificationResult,
};
pub use domain::errors::{DerError, EncodingError, KeyError, RangeError, RecoveryFailure, Result};
pub use domain::message::{message_digest, message_preimage};
pub use domain::network::Network;
pub use domain::private_key::PrivateKey;
pub use domain::public_key::PublicKey;
pub use domain::signature::Signature;
pub use ports::inbound::KeyIdentityApi;
pub use service::KeyIdentityService;

// Re-exported so callers can build scalars without naming the dependency.
pub use primitive_types::{U256, U512};
