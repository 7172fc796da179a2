//! Bitcoin network selection and its Base58Check version bytes.

use super::errors::RangeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Private key (WIF) version byte on mainnet.
pub const MAINNET_PRIVATE_KEY_VERSION: u8 = 0x80;
/// Private key (WIF) version byte on testnet.
pub const TESTNET_PRIVATE_KEY_VERSION: u8 = 0xEF;
/// P2PKH address version byte on mainnet.
pub const MAINNET_ADDRESS_VERSION: u8 = 0x00;
/// P2PKH address version byte on testnet.
pub const TESTNET_ADDRESS_VERSION: u8 = 0x6F;

/// Network whose version bytes are used for Base58Check encodings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    /// Version byte prefixed to a serialized private key.
    pub const fn private_key_version(self) -> u8 {
        match self {
            Network::Mainnet => MAINNET_PRIVATE_KEY_VERSION,
            Network::Testnet => TESTNET_PRIVATE_KEY_VERSION,
        }
    }

    /// Version byte prefixed to a P2PKH address.
    pub const fn address_version(self) -> u8 {
        match self {
            Network::Mainnet => MAINNET_ADDRESS_VERSION,
            Network::Testnet => TESTNET_ADDRESS_VERSION,
        }
    }

    /// Network for a private key version byte.
    pub fn from_private_key_version(version: u8) -> Result<Self, RangeError> {
        match version {
            MAINNET_PRIVATE_KEY_VERSION => Ok(Network::Mainnet),
            TESTNET_PRIVATE_KEY_VERSION => Ok(Network::Testnet),
            other => Err(RangeError::UnknownVersion(other)),
        }
    }

    pub fn is_testnet(self) -> bool {
        self == Network::Testnet
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => f.write_str("mainnet"),
            Network::Testnet => f.write_str("testnet"),
        }
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mainnet" | "main" | "bitcoin" => Ok(Network::Mainnet),
            "testnet" | "test" | "testnet3" => Ok(Network::Testnet),
            other => Err(format!("unknown network '{}'", other)),
        }
    }
}
