//! Convenience re-exports for the escrow pipeline.

pub use crate::{
    amount::{Amount, AmountError},
    builder::BitcoinTxBuilder,
    derive::{derive_script_address, ScriptAddress},
    enc::*,
    escrow::*,
    hashes::TXID,
    nets::Network,
    params::{validate, BuilderParams, FundingVin, ParamError},
    types::*,
};

pub use escrow_core::{enc::AddressEncoder, ser::ByteFormat};
