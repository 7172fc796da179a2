//! # Inbound Ports (Driving Ports / API)
//!
//! The key identity API offered to wallet code.

use crate::domain::entities::{BatchVerificationRequest, BatchVerificationResult, MessageVerification};
use crate::domain::errors::KeyError;
use crate::domain::private_key::PrivateKey;
use crate::domain::public_key::PublicKey;

/// Key management and message signing for one configured network.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait KeyIdentityApi: Send + Sync {
    // =========================================================================
    // Keys
    // =========================================================================

    /// Generate a fresh key from the OS random source.
    fn generate_key(&self) -> PrivateKey;

    /// Import a Base58Check (WIF) key.
    fn import_key(&self, wif: &str) -> Result<PrivateKey, KeyError>;

    /// Export a key as Base58Check (WIF) for the configured network.
    fn export_key(&self, key: &PrivateKey) -> String;

    /// P2PKH address using the configured network and compression.
    fn address(&self, key: &PublicKey) -> String;

    // =========================================================================
    // Signed messages
    // =========================================================================

    /// Produce a Base64 signed-message envelope.
    fn sign_message(&self, key: &PrivateKey, message: &[u8]) -> Result<String, KeyError>;

    /// Check a signed-message envelope against the address that supposedly
    /// signed it.
    fn verify_message(&self, address: &str, message: &[u8], signature: &str) -> MessageVerification;

    // =========================================================================
    // Bulk verification
    // =========================================================================

    /// Verify many signatures in parallel.
    ///
    /// Fails without verifying anything when the batch exceeds the configured
    /// maximum.
    fn batch_verify(
        &self,
        request: &BatchVerificationRequest,
    ) -> Result<BatchVerificationResult, KeyError>;
}
