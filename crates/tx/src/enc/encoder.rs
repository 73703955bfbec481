//! Defines parameterized Bitcoin encoders for Mainnet and Testnet.

use std::marker::PhantomData;

use escrow_core::enc::{
    decode_base58, decode_base58_hash160, encode_base58, AddressEncoder, EncodingError,
    EncodingResult,
};

use crate::types::script::{ScriptPubkey, ScriptType};

/// The available Bitcoin Address types, implemented as a type enum around strings.
#[derive(PartialEq, Eq, Clone, Debug, Hash)]
pub enum Address {
    /// Legacy Pay to Pubkeyhash
    Pkh(String),
    /// Legacy Pay to Scripthash
    Sh(String),
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Address {
    /// Get a reference to the string underlying the address type.
    pub fn as_str(&self) -> &str {
        match self {
            Address::Pkh(s) => s,
            Address::Sh(s) => s,
        }
    }

    /// Get a clone of the string underlying the address type.
    pub fn as_string(&self) -> String {
        self.as_str().to_owned()
    }
}

/// NetworkParams holds the encoding parameters for a bitcoin-like network. This is the pair of
/// base58check version bytes for Legacy PKH and SH addresses.
pub trait NetworkParams {
    /// The Legacy PKH base58check version byte. 0x00 for mainnet.
    const PKH_VERSION: u8;
    /// The Legacy SH base58check version byte. 0x05 for mainnet.
    const SH_VERSION: u8;
}

/// Marker trait to simplify encoder representation elsewhere
pub trait BitcoinEncoderMarker:
    AddressEncoder<Address = Address, Error = EncodingError, RecipientIdentifier = ScriptPubkey>
{
}

/// The standard encoder for Bitcoin networks. Parameterized by a `NetworkParams` type.
#[derive(Debug, Clone)]
pub struct BitcoinEncoder<P: NetworkParams>(PhantomData<fn(P) -> P>);

impl<P: NetworkParams> AddressEncoder for BitcoinEncoder<P> {
    type Address = Address;
    type Error = EncodingError;
    type RecipientIdentifier = ScriptPubkey;

    fn encode_address(s: &ScriptPubkey) -> EncodingResult<Address> {
        match s.standard_type() {
            ScriptType::Pkh(payload) => Ok(Address::Pkh(encode_base58(P::PKH_VERSION, &payload))),
            ScriptType::Sh(payload) => Ok(Address::Sh(encode_base58(P::SH_VERSION, &payload))),
            _ => Err(EncodingError::UnknownScriptType),
        }
    }

    fn decode_address(addr: &Address) -> EncodingResult<ScriptPubkey> {
        match addr {
            Address::Pkh(s) => decode_base58(P::PKH_VERSION, s).map(|h| ScriptPubkey::p2pkh(&h)),
            Address::Sh(s) => decode_base58(P::SH_VERSION, s).map(|h| ScriptPubkey::p2sh(&h)),
        }
    }

    fn string_to_address(string: &str) -> EncodingResult<Address> {
        let (version, _) = decode_base58_hash160(string)?;
        let s = string.to_owned();
        if version == P::PKH_VERSION {
            Ok(Address::Pkh(s))
        } else if version == P::SH_VERSION {
            Ok(Address::Sh(s))
        } else {
            Err(EncodingError::WrongVersion {
                expected: vec![P::PKH_VERSION, P::SH_VERSION],
                got: version,
            })
        }
    }
}

impl<P: NetworkParams> BitcoinEncoderMarker for BitcoinEncoder<P> {}

/// A param struct for Bitcoin Mainnet
#[derive(Debug, Clone)]
pub struct Main;

impl NetworkParams for Main {
    const PKH_VERSION: u8 = 0x00;
    const SH_VERSION: u8 = 0x05;
}

/// A param struct for Bitcoin Testnet
#[derive(Debug, Clone)]
pub struct Test;

impl NetworkParams for Test {
    const PKH_VERSION: u8 = 0x6f;
    const SH_VERSION: u8 = 0xc4;
}

/// An encoder for Bitcoin Mainnet
pub type MainnetEncoder = BitcoinEncoder<Main>;

/// An encoder for Bitcoin Testnet
pub type TestnetEncoder = BitcoinEncoder<Test>;
