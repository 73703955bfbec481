//! Holds utilites for working with cryptographic digests, and disambiguating digests via marker
//! traits.
//!
//! We want to wrap hashes in marked newtypes in order to prevent type-confusion between TXIDs,
//! script hashes, and other digests with the same length.

/// Marked hashes
pub mod marked;

/// Tooling for bitcoin-style double-sha2
pub mod hash256;

/// Tooling for bitcoin-style `ripemd160(sha256(x))`
pub mod hash160;

pub use hash160::*;
pub use hash256::*;
pub use marked::*;

use digest::Digest;
use sha2::Sha256;

/// A 32-byte single-sha2 output.
pub type Sha256Digest = [u8; 32];

/// Compute the single sha256 of `data`.
pub fn sha256(data: &[u8]) -> Sha256Digest {
    let mut digest = Sha256Digest::default();
    digest.copy_from_slice(&Sha256::digest(data));
    digest
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_computes_sha256() {
        assert_eq!(
            hex::encode(sha256(&[0x93, 0x57, 0x87])),
            "f5ac8d00e92b7131aae203ea7c8836842ec5fbd63f6c99c3ec1224d8adbd1075"
        );
    }
}
