//! The `enc` module defines an abstract `AddressEncoder` and the base58check helpers that
//! concrete encoders are built from. A concrete implementation for Bitcoin networks can be found
//! in the `escrow-tx` crate.

use thiserror::Error;

/// Length of a base58check payload carrying a version byte and a 20-byte hash.
pub const VERSIONED_HASH160_LEN: usize = 21;

/// An AddressEncoder encodes and decodes addresses. This struct is used by the transaction
/// builder to decode addresses to the network's `RecipientIdentifier`.
pub trait AddressEncoder {
    /// A type representing the encoded address
    type Address;

    /// An error type that will be returned in case of encoding errors
    type Error;

    /// A type representing the in-protocol recipient. This is usually different from the
    /// Address type.
    type RecipientIdentifier;

    /// Encode a script as an address.
    fn encode_address(s: &Self::RecipientIdentifier) -> Result<Self::Address, Self::Error>;

    /// Decode a script from an address.
    fn decode_address(addr: &Self::Address) -> Result<Self::RecipientIdentifier, Self::Error>;

    /// Convert a string to an address. Fails if the string is not a valid address for this
    /// network.
    fn string_to_address(s: &str) -> Result<Self::Address, Self::Error>;
}

/// Errors that can be returned by address encoders.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// Returned when the base58check decoder rejects its input. This covers invalid
    /// characters, missing data, and checksum mismatches.
    #[error(transparent)]
    Base58Error(#[from] bs58::decode::Error),

    /// Returned when an address carries a version byte that this network does not use.
    #[error("Version byte mismatch. Expected {:?}. Got {:?}.", .expected, .got)]
    WrongVersion {
        /// The version byte(s) the network accepts
        expected: Vec<u8>,
        /// The version byte found in the address
        got: u8,
    },

    /// Returned when the decoded payload is not a version byte followed by a 20-byte hash.
    #[error("Invalid payload length. Expected {}. Got {}.", VERSIONED_HASH160_LEN, .0)]
    InvalidLength(usize),

    /// Returned when a script can't be expressed as an address on this network.
    #[error("Unknown Script Type")]
    UnknownScriptType,
}

/// A simple result type alias
pub type EncodingResult<T> = Result<T, EncodingError>;

/// Encode a version byte and a payload to base58check. The checksum is the first 4 bytes of
/// `sha256(sha256(version || payload))`.
pub fn encode_base58(version: u8, payload: &[u8]) -> String {
    let mut v = Vec::with_capacity(payload.len() + 1);
    v.push(version);
    v.extend_from_slice(payload);
    bs58::encode(v).with_check().into_string()
}

/// Decode a base58check string carrying a version byte and a 20-byte hash. Verifies the
/// checksum and the payload length, and returns the version byte and the hash.
pub fn decode_base58_hash160(s: &str) -> EncodingResult<(u8, [u8; 20])> {
    let data = bs58::decode(s).with_check(None).into_vec()?;
    if data.len() != VERSIONED_HASH160_LEN {
        return Err(EncodingError::InvalidLength(data.len()));
    }
    let mut hash = [0u8; 20];
    hash.copy_from_slice(&data[1..]);
    Ok((data[0], hash))
}

/// Decode a base58check string and check that its version byte is `expected_version`.
pub fn decode_base58(expected_version: u8, s: &str) -> EncodingResult<[u8; 20]> {
    let (version, hash) = decode_base58_hash160(s)?;
    if version != expected_version {
        return Err(EncodingError::WrongVersion {
            expected: vec![expected_version],
            got: version,
        });
    }
    Ok(hash)
}
