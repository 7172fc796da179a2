//! Identity service configuration and validation
//!
//! # Example
//!
//! ```
//! use btc_identity::{IdentityConfigBuilder, Network};
//!
//! let config = IdentityConfigBuilder::new()
//!     .network(Network::Testnet)
//!     .compressed_addresses(false)
//!     .max_batch_size(500)
//!     .build()
//!     .expect("valid config");
//! assert_eq!(config.network, Network::Testnet);
//! ```

use super::errors::{KeyError, Result};
use super::network::Network;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use tracing::warn;

/// Default cap on a single batch verification.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 10_000;

/// Configuration for [`KeyIdentityService`](crate::KeyIdentityService).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Network for WIF export and addresses
    pub network: Network,
    /// Derive addresses from the compressed key form
    pub compressed_addresses: bool,
    /// Maximum requests accepted by one batch verification
    pub max_batch_size: usize,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            network: Network::Mainnet,
            compressed_addresses: true,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }
}

impl IdentityConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `BTC_NETWORK`: `mainnet` or `testnet` (default: mainnet)
    /// - `BTC_COMPRESSED_ADDRESSES`: use compressed keys for addresses (default: true)
    /// - `BTC_MAX_BATCH_SIZE`: batch verification cap (default: 10000)
    ///
    /// Unparseable values fall back to the default with a warning; the
    /// result is validated.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            network: env_or_default("BTC_NETWORK", defaults.network),

            compressed_addresses: env::var("BTC_COMPRESSED_ADDRESSES")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.compressed_addresses),

            max_batch_size: env_or_default("BTC_MAX_BATCH_SIZE", defaults.max_batch_size),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_batch_size == 0 {
            return Err(KeyError::InvalidConfig(
                "max_batch_size cannot be 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Builder-style method to set the network
    pub fn with_network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }
}

fn env_or_default<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(value) => value.parse().unwrap_or_else(|err| {
            warn!(key, %value, %err, fallback = %default, "Ignoring unparseable environment value");
            default
        }),
        Err(_) => default,
    }
}

/// Builder for [`IdentityConfig`] with validation.
#[derive(Default)]
pub struct IdentityConfigBuilder {
    network: Option<Network>,
    compressed_addresses: Option<bool>,
    max_batch_size: Option<usize>,
}

impl IdentityConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn network(mut self, network: Network) -> Self {
        self.network = Some(network);
        self
    }

    pub fn compressed_addresses(mut self, compressed: bool) -> Self {
        self.compressed_addresses = Some(compressed);
        self
    }

    /// Set the batch verification cap (must be non-zero)
    pub fn max_batch_size(mut self, size: usize) -> Self {
        self.max_batch_size = Some(size);
        self
    }

    /// Build the config, validating all parameters
    pub fn build(self) -> Result<IdentityConfig> {
        let defaults = IdentityConfig::default();

        let config = IdentityConfig {
            network: self.network.unwrap_or(defaults.network),
            compressed_addresses: self
                .compressed_addresses
                .unwrap_or(defaults.compressed_addresses),
            max_batch_size: self.max_batch_size.unwrap_or(defaults.max_batch_size),
        };
        config.validate()?;
        Ok(config)
    }
}
