//! The `nets` module contains the runtime Bitcoin network selector. Callers of the escrow
//! pipeline pass a `Network` value; it dispatches to the matching type-level encoder.
//!
//! ```
//! use escrow_tx::nets::Network;
//!
//! let network: Network = "testnet".parse().unwrap();
//! let address = network.string_to_address("2MxvBWEq38yWxqxgvNYPLVWMvDafL9breUF").unwrap();
//! let script = network.decode_address(&address).unwrap();
//! assert_eq!(network.encode_address(&script).unwrap(), address);
//! ```

use std::{fmt, str::FromStr};

use escrow_core::enc::{AddressEncoder, EncodingResult};
use thiserror::Error;

use crate::{
    enc::{Address, Main, MainnetEncoder, NetworkParams, Test, TestnetEncoder},
    types::ScriptPubkey,
};

/// Returned when a network name is not recognized.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown network: {0:?}")]
pub struct UnknownNetwork(pub String);

/// A Bitcoin network.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Network {
    /// Bitcoin mainnet
    #[serde(rename = "main", alias = "mainnet", alias = "bitcoin")]
    Main,
    /// Bitcoin testnet
    #[serde(rename = "test", alias = "testnet")]
    Test,
}

impl Default for Network {
    fn default() -> Self {
        crate::defaults::network::DEFAULT_NETWORK
    }
}

impl Network {
    /// The version field of funding transactions built for this network.
    ///
    /// Testnet transactions are version 2 and mainnet transactions are version 1. Wallets have
    /// always emitted these values; no reason for the difference is known.
    pub fn tx_version(&self) -> u32 {
        match self {
            Network::Main => 1,
            Network::Test => 2,
        }
    }

    /// The base58check version byte of PKH addresses.
    pub fn pkh_version(&self) -> u8 {
        match self {
            Network::Main => Main::PKH_VERSION,
            Network::Test => Test::PKH_VERSION,
        }
    }

    /// The base58check version byte of SH addresses.
    pub fn sh_version(&self) -> u8 {
        match self {
            Network::Main => Main::SH_VERSION,
            Network::Test => Test::SH_VERSION,
        }
    }

    /// Encode a script pubkey as an address on this network.
    pub fn encode_address(&self, script: &ScriptPubkey) -> EncodingResult<Address> {
        match self {
            Network::Main => MainnetEncoder::encode_address(script),
            Network::Test => TestnetEncoder::encode_address(script),
        }
    }

    /// Decode an address on this network to its script pubkey.
    pub fn decode_address(&self, address: &Address) -> EncodingResult<ScriptPubkey> {
        match self {
            Network::Main => MainnetEncoder::decode_address(address),
            Network::Test => TestnetEncoder::decode_address(address),
        }
    }

    /// Parse and classify an address string. Fails if it isn't valid on this network.
    pub fn string_to_address(&self, s: &str) -> EncodingResult<Address> {
        match self {
            Network::Main => MainnetEncoder::string_to_address(s),
            Network::Test => TestnetEncoder::string_to_address(s),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Main => f.write_str("main"),
            Network::Test => f.write_str("test"),
        }
    }
}

impl FromStr for Network {
    type Err = UnknownNetwork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "main" | "mainnet" | "bitcoin" => Ok(Network::Main),
            "test" | "testnet" => Ok(Network::Test),
            _ => Err(UnknownNetwork(s.to_owned())),
        }
    }
}
