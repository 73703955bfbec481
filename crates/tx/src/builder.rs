//! A builder for unsigned legacy Bitcoin transactions.
//!
//! The builder is parameterized by an address encoder, so that the same struct and logic can be
//! used on mainnet and testnet. Inputs are added with empty script sigs; signing happens
//! elsewhere.

use std::marker::PhantomData;

use escrow_core::{enc::EncodingResult, ser::ByteFormat};

use crate::{
    enc::encoder::{Address, BitcoinEncoderMarker},
    types::{
        script::{ScriptPubkey, ScriptSig},
        tx::{TxResult, UnsignedTx},
        txin::{BitcoinTxIn, Outpoint},
        txout::TxOut,
    },
};

/// This is a generic builder for unsigned Bitcoin transactions.
///
/// Note: due to Bitcoin consensus rules, the order of inputs and outputs may be semantically
/// meaningful. The builder preserves insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct BitcoinTxBuilder<T: BitcoinEncoderMarker> {
    version: u32,
    vin: Vec<BitcoinTxIn>,
    vout: Vec<TxOut>,
    locktime: u32,
    encoder: PhantomData<fn(T) -> T>,
}

impl<T: BitcoinEncoderMarker> Default for BitcoinTxBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BitcoinTxBuilder<T>
where
    T: BitcoinEncoderMarker,
{
    /// Instantiate a new builder. Version 1, no inputs or outputs, locktime 0.
    pub fn new() -> Self {
        Self {
            version: 1,
            vin: vec![],
            vout: vec![],
            locktime: 0,
            encoder: PhantomData,
        }
    }

    /// Instantiate a builder from a transaction.
    pub fn from_tx(tx: UnsignedTx) -> Self {
        Self {
            version: tx.version,
            vin: tx.vin,
            vout: tx.vout,
            locktime: tx.locktime,
            encoder: PhantomData,
        }
    }

    /// Instantiate a builder from a hex-serialized transaction.
    pub fn from_hex(hex_tx: &str) -> TxResult<Self> {
        Ok(Self::from_tx(UnsignedTx::deserialize_hex(hex_tx)?))
    }

    /// Set the version field.
    pub fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Spend an outpoint, with an empty script sig.
    pub fn spend(mut self, prevout: Outpoint, sequence: u32) -> Self {
        self.vin
            .push(BitcoinTxIn::new(prevout, ScriptSig::null(), sequence));
        self
    }

    /// Add an output paying `value` to `address`. Fails if the address does not decode on this
    /// builder's network.
    pub fn pay(self, value: u64, address: &Address) -> EncodingResult<Self> {
        let script_pubkey = T::decode_address(address)?;
        Ok(self.pay_script_pubkey(value, script_pubkey))
    }

    /// Add an output paying `value` to `script_pubkey`
    pub fn pay_script_pubkey(mut self, value: u64, script_pubkey: ScriptPubkey) -> Self {
        self.vout.push(TxOut::new(value, script_pubkey));
        self
    }

    /// Add a set of inputs to the transaction.
    pub fn extend_inputs<I>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = BitcoinTxIn>,
    {
        self.vin.extend(inputs);
        self
    }

    /// Add a set of outputs to the transaction.
    pub fn extend_outputs<I>(mut self, outputs: I) -> Self
    where
        I: IntoIterator<Item = TxOut>,
    {
        self.vout.extend(outputs);
        self
    }

    /// Set the locktime field.
    pub fn locktime(mut self, locktime: u32) -> Self {
        self.locktime = locktime;
        self
    }

    /// Consume the builder and produce a transaction.
    pub fn build(self) -> UnsignedTx {
        UnsignedTx::new(self.version, self.vin, self.vout, self.locktime)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        enc::{MainnetEncoder, TestnetEncoder},
        types::txin::MAX_SEQUENCE,
    };

    #[test]
    fn it_has_sensible_syntax() {
        let tx_hex = BitcoinTxBuilder::<MainnetEncoder>::new()
            .version(2)
            .spend(Outpoint::default(), 0xaabbccdd)
            .pay(
                0x8888_8888_8888_8888,
                &Address::Pkh("12JvxPk4mT4PKMVHuHc1aQGBZpotQWQwF6".to_owned()),
            )
            .unwrap()
            .pay(
                0x7777_7777_7777_7777,
                &Address::Sh("37MySVu1XX1ceB4NhQmTsZNf1ETAKGbNFh".to_owned()),
            )
            .unwrap()
            .build()
            .serialize_hex()
            .unwrap();
        let rebuilt = BitcoinTxBuilder::<MainnetEncoder>::from_hex(&tx_hex).unwrap();
        assert_eq!(rebuilt.build().serialize_hex().unwrap(), tx_hex);
    }

    #[test]
    fn it_builds_the_fixture_funding_tx() {
        let outpoint = Outpoint::from_explorer_format(
            "1ece533038831e69e6b09c89441460c6e2715db10ab94f786b8fffe266a1e622",
            0,
        )
        .unwrap();
        let escrow = ScriptPubkey::new(
            hex::decode("a914f0ca58dc8e539421a3cb4a9c22c059973075287c87").unwrap(),
        );
        let tx = BitcoinTxBuilder::<TestnetEncoder>::new()
            .version(2)
            .spend(outpoint, MAX_SEQUENCE)
            .pay_script_pubkey(200_000_000, escrow)
            .pay(
                2_000_000,
                &Address::Sh("2N4VF4FeSfvmL4wLPRWNQNx4oagQR4fwpzT".to_owned()),
            )
            .unwrap()
            .pay(
                297_990_000,
                &Address::Sh("2MxvBWEq38yWxqxgvNYPLVWMvDafL9breUF".to_owned()),
            )
            .unwrap()
            .locktime(0)
            .build();
        assert_eq!(
            tx.serialize_hex().unwrap(),
            "020000000122e6a166e2ff8f6b784fb90ab15d71e2c6601444899cb0e6691e83383053ce1e0000000000ffffffff0300c2eb0b0000000017a914f0ca58dc8e539421a3cb4a9c22c059973075287c8780841e000000000017a9147b501956506de428717e46d21db34065dc26d9788770f7c2110000000017a9143e36c73d865cbeec91069a23c4c0dd1e43a0034f8700000000"
        );
    }

    #[test]
    fn it_preserves_insertion_order() {
        let outputs = vec![
            TxOut::new(3, ScriptPubkey::new(vec![0x51])),
            TxOut::new(1, ScriptPubkey::new(vec![0x52])),
        ];
        let tx = BitcoinTxBuilder::<TestnetEncoder>::new()
            .extend_outputs(outputs.clone())
            .extend_inputs(vec![
                BitcoinTxIn::unsigned(Outpoint::null()),
                BitcoinTxIn::unsigned(Outpoint::default()),
            ])
            .build();
        assert_eq!(tx.outputs(), &outputs[..]);
        assert_eq!(tx.inputs().len(), 2);
        assert_eq!(tx.version(), 1);
        assert!(tx.is_unsigned());
    }

    #[test]
    fn it_rejects_addresses_for_other_networks() {
        let result = BitcoinTxBuilder::<TestnetEncoder>::new().pay(
            1,
            &Address::Sh("37MySVu1XX1ceB4NhQmTsZNf1ETAKGbNFh".to_owned()),
        );
        assert!(result.is_err());
    }
}
