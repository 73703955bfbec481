//! Assembly of unsigned escrow funding transactions.
//!
//! The funding transaction spends every seller input, in order, and creates exactly three
//! outputs, in order:
//!
//! 1. the escrowed amount, to the script address
//! 2. the third-party fee, to the third-party address
//! 3. the change, to the seller address
//!
//! The miners' fee is never an output. It is the difference between the inputs and the outputs.
//! All money arithmetic happens on exact decimals; each output value is converted to satoshis
//! (truncating) only at the end.

use escrow_core::{
    enc::EncodingError,
    ser::{ByteFormat, SerError},
};
use thiserror::Error;
use tracing::debug;

use crate::{
    amount::{Amount, AmountError},
    builder::BitcoinTxBuilder,
    enc::{BitcoinEncoderMarker, MainnetEncoder, TestnetEncoder},
    nets::Network,
    params::{BuilderParams, ParamError},
    types::{
        script::ScriptPubkey,
        tx::{TxError, UnsignedTx},
        txin::{BitcoinTxIn, Outpoint},
    },
};

/// Errors returned while assembling a funding transaction.
#[derive(Debug, Error)]
pub enum BuildError {
    /// An address failed base58check decoding, or belongs to another network.
    #[error("Malformed {field}: {source}")]
    MalformedAddress {
        /// The camelCase name of the offending parameter
        field: &'static str,
        /// The underlying decoding error
        source: EncodingError,
    },

    /// A funding input's txid is not 32 bytes of hex.
    #[error("Invalid txid {txid:?}: {source}")]
    InvalidTxid {
        /// The offending txid, as given
        txid: String,
        /// The underlying deserialization error
        source: SerError,
    },

    /// An amount could not be converted to base units.
    #[error(transparent)]
    Amount(#[from] AmountError),

    /// The inputs do not cover the escrowed amount and fees.
    #[error("Insufficient funds: need {needed}, inputs hold {available}")]
    InsufficientFunds {
        /// amount + third-party fee + miners' fee
        needed: Amount,
        /// the sum of the input amounts
        available: Amount,
    },

    /// The transaction could not be serialized.
    #[error(transparent)]
    Tx(#[from] TxError),

    /// Returned by `build_checked` when validation fails.
    #[error(transparent)]
    MissingParameter(#[from] ParamError),
}

/// Type alias for results with a BuildError
pub type BuildResult<T> = Result<T, BuildError>;

fn resolve<T>(address: &str, field: &'static str) -> BuildResult<ScriptPubkey>
where
    T: BitcoinEncoderMarker,
{
    T::string_to_address(address)
        .and_then(|addr| T::decode_address(&addr))
        .map_err(|source| BuildError::MalformedAddress { field, source })
}

fn assemble<T>(params: &BuilderParams, network: Network) -> BuildResult<UnsignedTx>
where
    T: BitcoinEncoderMarker,
{
    let escrow_script = resolve::<T>(&params.script_address, "scriptAddress")?;
    let thirdparty_script = resolve::<T>(&params.thirdparty_address, "thirdpartyAddress")?;
    let seller_script = resolve::<T>(&params.seller_address, "sellerAddress")?;

    let inputs = params
        .transaction_vins
        .iter()
        .map(|vin| {
            Outpoint::from_explorer_format(&vin.txid, vin.vout)
                .map(BitcoinTxIn::unsigned)
                .map_err(|source| BuildError::InvalidTxid {
                    txid: vin.txid.clone(),
                    source,
                })
        })
        .collect::<BuildResult<Vec<_>>>()?;

    let available = Amount::checked_sum(params.transaction_vins.iter().map(|vin| vin.amount))?;
    let needed = Amount::checked_sum([params.amount, params.thirdparty_fee, params.miners_fee])?;
    let change = available.checked_sub(needed)?;
    if change.is_negative() {
        return Err(BuildError::InsufficientFunds { needed, available });
    }

    let escrow_value = params.amount.to_base_units()?;
    let fee_value = params.thirdparty_fee.to_base_units()?;
    let change_value = change.to_base_units()?;
    debug!(
        inputs = inputs.len(),
        escrow_value, fee_value, change_value, "assembled funding outputs"
    );

    Ok(BitcoinTxBuilder::<T>::new()
        .version(network.tx_version())
        .extend_inputs(inputs)
        .pay_script_pubkey(escrow_value, escrow_script)
        .pay_script_pubkey(fee_value, thirdparty_script)
        .pay_script_pubkey(change_value, seller_script)
        .locktime(0)
        .build())
}

/// Build the unsigned funding transaction for `params` on `network`.
///
/// The validator is not consulted. Every address must decode on `network`, every txid must be
/// 32 bytes of hex, and the inputs must cover the amount and both fees.
#[tracing::instrument(skip_all, err, fields(network = %network))]
pub fn build_unsigned_tx(params: &BuilderParams, network: Network) -> BuildResult<UnsignedTx> {
    match network {
        Network::Main => assemble::<MainnetEncoder>(params, network),
        Network::Test => assemble::<TestnetEncoder>(params, network),
    }
}

/// Build the unsigned funding transaction and return its lowercase raw hex.
pub fn build_transaction(params: &BuilderParams, network: Network) -> BuildResult<String> {
    let tx = build_unsigned_tx(params, network)?;
    Ok(tx.serialize_hex()?)
}

/// Run the validator, then `build_transaction`.
pub fn build_checked(params: &BuilderParams, network: Network) -> BuildResult<String> {
    params.validate()?;
    build_transaction(params, network)
}
