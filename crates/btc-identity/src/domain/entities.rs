//! # Service Entities
//!
//! Request and result types exchanged through the identity service.

use super::errors::KeyError;
use super::public_key::PublicKey;
use super::signature::Signature;

/// One signature to check against a known public key.
#[derive(Clone, Debug)]
pub struct VerificationRequest {
    pub public_key: PublicKey,
    /// Message, or its digest when `hash_first` is false
    pub message: Vec<u8>,
    pub signature: Signature,
    /// Hash `message` with SHA-256 before verifying
    pub hash_first: bool,
}

/// Outcome of a single verification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationResult {
    pub valid: bool,
    /// Why the request could not be evaluated, if it could not
    pub error: Option<KeyError>,
}

impl VerificationResult {
    pub fn valid() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    pub fn invalid() -> Self {
        Self {
            valid: false,
            error: None,
        }
    }

    pub fn failed(error: KeyError) -> Self {
        Self {
            valid: false,
            error: Some(error),
        }
    }
}

/// Many verifications to run together.
#[derive(Clone, Debug, Default)]
pub struct BatchVerificationRequest {
    pub requests: Vec<VerificationRequest>,
}

/// Outcome of a batch, in request order.
#[derive(Clone, Debug)]
pub struct BatchVerificationResult {
    pub results: Vec<VerificationResult>,
    pub all_valid: bool,
    pub valid_count: usize,
    pub invalid_count: usize,
}

impl BatchVerificationResult {
    /// Tally individual results.
    pub fn from_results(results: Vec<VerificationResult>) -> Self {
        let valid_count = results.iter().filter(|r| r.valid).count();
        let invalid_count = results.len() - valid_count;

        Self {
            results,
            all_valid: invalid_count == 0,
            valid_count,
            invalid_count,
        }
    }
}

/// Outcome of checking a signed message against an address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageVerification {
    /// Signature is valid and was made by the expected address
    pub valid: bool,
    /// Address of the recovered signer, when recovery succeeded
    pub recovered_address: Option<String>,
    pub error: Option<KeyError>,
}
