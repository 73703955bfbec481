//! Feature-selected network defaults, used by the `FromStr` and serde impls for addresses.

use escrow_core::enc::AddressEncoder;

#[cfg(not(any(feature = "mainnet", feature = "testnet")))]
compile_error!("one of the `mainnet` or `testnet` features must be enabled");

#[cfg(feature = "mainnet")]
/// Mainnet defaults
pub mod network {
    /// The default network, selected by feature flag
    pub const DEFAULT_NETWORK: crate::nets::Network = crate::nets::Network::Main;
    /// The default encoder, selected by feature flag
    pub type Encoder = crate::enc::MainnetEncoder;
}

#[cfg(all(feature = "testnet", not(feature = "mainnet")))]
/// Testnet defaults
pub mod network {
    /// The default network, selected by feature flag
    pub const DEFAULT_NETWORK: crate::nets::Network = crate::nets::Network::Test;
    /// The default encoder, selected by feature flag
    pub type Encoder = crate::enc::TestnetEncoder;
}

impl std::str::FromStr for crate::enc::Address {
    type Err = <network::Encoder as AddressEncoder>::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        network::Encoder::string_to_address(s)
    }
}

impl std::str::FromStr for crate::types::ScriptPubkey {
    type Err = <network::Encoder as AddressEncoder>::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        network::Encoder::decode_address(&network::Encoder::string_to_address(s)?)
    }
}

impl serde::Serialize for crate::enc::Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_ref())
    }
}

impl<'de> serde::Deserialize<'de> for crate::enc::Address {
    fn deserialize<D>(deserializer: D) -> Result<crate::enc::Address, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s: &str = serde::Deserialize::deserialize(deserializer)?;
        network::Encoder::string_to_address(s).map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}
