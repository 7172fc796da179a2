//! # Key Identity Service
//!
//! Application service layer that implements the `KeyIdentityApi` trait.
//!
//! ## Architecture
//!
//! - Implements the inbound port (`KeyIdentityApi`)
//! - Applies [`IdentityConfig`] (network, address compression, batch cap)
//! - Delegates cryptographic operations to the domain layer

use crate::domain::config::IdentityConfig;
use crate::domain::entities::{
    BatchVerificationRequest, BatchVerificationResult, MessageVerification, VerificationRequest,
    VerificationResult,
};
use crate::domain::errors::{EncodingError, KeyError, Result};
use crate::domain::private_key::PrivateKey;
use crate::domain::public_key::PublicKey;
use crate::ports::inbound::KeyIdentityApi;
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Digest length expected when a request is not hashed first.
const PREHASH_LEN: usize = 32;

/// Key Identity Service.
///
/// Stateless apart from its configuration, so one instance can be shared
/// across threads.
#[derive(Clone, Debug, Default)]
pub struct KeyIdentityService {
    config: IdentityConfig,
}

impl KeyIdentityService {
    /// Create a service with a validated configuration.
    pub fn new(config: IdentityConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a service configured from `BTC_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(IdentityConfig::from_env()?)
    }

    pub fn config(&self) -> &IdentityConfig {
        &self.config
    }

    fn matches_address(&self, key: &PublicKey, address: &str) -> bool {
        let network = self.config.network;
        key.address(true, network) == address || key.address(false, network) == address
    }
}

impl KeyIdentityApi for KeyIdentityService {
    fn generate_key(&self) -> PrivateKey {
        let key = PrivateKey::from_random();
        info!(
            network = %self.config.network,
            address = %self.address(key.public_key()),
            "Generated private key"
        );
        key
    }

    fn import_key(&self, wif: &str) -> Result<PrivateKey> {
        let (key, network) = PrivateKey::from_base58check_with_network(wif)?;
        if network != self.config.network {
            warn!(
                key_network = %network,
                configured = %self.config.network,
                "Imported private key belongs to another network"
            );
        }
        info!(address = %self.address(key.public_key()), "Imported private key");
        Ok(key)
    }

    fn export_key(&self, key: &PrivateKey) -> String {
        info!(
            network = %self.config.network,
            address = %self.address(key.public_key()),
            "Exported private key"
        );
        key.to_base58check(self.config.network)
    }

    fn address(&self, key: &PublicKey) -> String {
        key.address(self.config.compressed_addresses, self.config.network)
    }

    fn sign_message(&self, key: &PrivateKey, message: &[u8]) -> Result<String> {
        let envelope = key.sign_bitcoin_message(message)?;
        debug!(len = message.len(), "Signed message");
        Ok(envelope)
    }

    fn verify_message(&self, address: &str, message: &[u8], signature: &str) -> MessageVerification {
        let recovered = PublicKey::recover_bitcoin_message(message, signature).and_then(|key| {
            let verified = key.verify_signed_message(message, signature)?;
            Ok((key, verified))
        });

        match recovered {
            Ok((key, verified)) => {
                let valid = verified && self.matches_address(&key, address);
                if !valid {
                    warn!(expected = address, "Signed message does not match address");
                }
                MessageVerification {
                    valid,
                    recovered_address: Some(self.address(&key)),
                    error: None,
                }
            }
            Err(err) => {
                warn!(%err, expected = address, "Signed message verification failed");
                MessageVerification {
                    valid: false,
                    recovered_address: None,
                    error: Some(err),
                }
            }
        }
    }

    fn batch_verify(&self, request: &BatchVerificationRequest) -> Result<BatchVerificationResult> {
        let size = request.requests.len();
        if size > self.config.max_batch_size {
            warn!(size, max = self.config.max_batch_size, "Rejected oversized batch");
            return Err(KeyError::BatchTooLarge {
                size,
                max: self.config.max_batch_size,
            });
        }

        let results: Vec<VerificationResult> =
            request.requests.par_iter().map(verify_single_request).collect();
        let result = BatchVerificationResult::from_results(results);

        debug!(
            size,
            valid = result.valid_count,
            invalid = result.invalid_count,
            "Batch verification complete"
        );
        Ok(result)
    }
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

fn verify_single_request(req: &VerificationRequest) -> VerificationResult {
    if !req.hash_first && req.message.len() != PREHASH_LEN {
        return VerificationResult::failed(
            EncodingError::Length {
                expected: PREHASH_LEN,
                actual: req.message.len(),
            }
            .into(),
        );
    }

    if req
        .public_key
        .verify(&req.message, &req.signature, req.hash_first)
    {
        VerificationResult::valid()
    } else {
        VerificationResult::invalid()
    }
}

// =============================================================================
// TESTS
// =============================================================================
