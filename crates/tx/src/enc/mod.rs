//! Contains Bitcoin address encoders for mainnet and testnet. Only base58check addresses (legacy
//! PKH and SH) are supported.

pub mod encoder;

pub use encoder::*;
