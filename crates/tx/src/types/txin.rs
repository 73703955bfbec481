//! Bitcoin Outpoint, TxIn, and Vin types.

use std::io::{Read, Write};

use escrow_core::ser::{ByteFormat, SerError, SerResult};

use crate::{hashes::TXID, types::script::ScriptSig};

/// The maximal sequence number. Opts out of relative locktime and replacement semantics.
pub const MAX_SEQUENCE: u32 = 0xffff_ffff;

/// An Outpoint. This is a unique identifier for a UTXO, and is composed of a transaction ID (in
/// Bitcoin-style LE format), and the index of the output being spent within that transactions
/// output vectour (vout).
///
/// `Outpoint::null()` and `Outpoint::default()` return the null Outpoint, which references a txid
/// of all 0, and a index 0xffff_ffff. This null outpoint is used in every coinbase transaction.
#[derive(serde::Serialize, serde::Deserialize, Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Outpoint {
    /// The txid that created the UTXO being pointed to.
    pub txid: TXID,
    /// The index of that UTXO in the transaction's output vector.
    pub idx: u32,
}

impl Outpoint {
    /// Returns a new Outpoint from a digest and index
    pub fn new(txid: TXID, idx: u32) -> Self {
        Self { txid, idx }
    }

    /// Returns the `default`, or `null` Outpoint. This is used in the coinbase input.
    pub fn null() -> Self {
        Outpoint {
            txid: TXID::default(),
            idx: 0xffff_ffff,
        }
    }

    /// Return the BE txid as hex, suitable for block explorers
    pub fn txid_be_hex(&self) -> String {
        self.txid.to_be_hex()
    }

    /// Instantiate an outpoint from the Block Explorer (big-endian) TXID format and integer
    /// index.
    pub fn from_explorer_format(txid_be: &str, idx: u32) -> SerResult<Self> {
        Ok(Self {
            txid: TXID::from_be_hex(txid_be)?,
            idx,
        })
    }
}

impl Default for Outpoint {
    fn default() -> Self {
        Outpoint::null()
    }
}

impl ByteFormat for Outpoint {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        36
    }

    fn read_from<T>(reader: &mut T, _limit: usize) -> SerResult<Self>
    where
        T: Read,
        Self: std::marker::Sized,
    {
        Ok(Outpoint {
            txid: TXID::read_from(reader, 0)?,
            idx: Self::read_u32_le(reader)?,
        })
    }

    fn write_to<T>(&self, writer: &mut T) -> SerResult<usize>
    where
        T: Write,
    {
        let mut len = self.txid.write_to(writer)?;
        len += Self::write_u32_le(writer, self.idx)?;
        Ok(len)
    }
}

/// An TxInput. This data structure contains an outpoint referencing an existing UTXO, a
/// `script_sig`, which will contain spend authorization information once signed, and a sequence
/// number which may encode relative locktime semantics in version 2+ transactions.
///
/// Inputs produced by this crate are unsigned: the `script_sig` is the null prefixed vector.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Eq, PartialEq, Default)]
pub struct BitcoinTxIn {
    /// The Outpoint identifying the UTXO being spent.
    pub outpoint: Outpoint,
    /// The authorization information necessary to spend the UTXO.
    pub script_sig: ScriptSig,
    /// The nSequence field
    pub sequence: u32,
}

impl BitcoinTxIn {
    /// Instantiate a new TxInput
    pub fn new<T>(outpoint: Outpoint, script_sig: T, sequence: u32) -> Self
    where
        T: Into<ScriptSig>,
    {
        BitcoinTxIn {
            outpoint,
            script_sig: script_sig.into(),
            sequence,
        }
    }

    /// Instantiate an input with an empty script sig and the maximal sequence number.
    pub fn unsigned(outpoint: Outpoint) -> Self {
        Self::new(outpoint, ScriptSig::null(), MAX_SEQUENCE)
    }

    /// True if the script sig is empty.
    pub fn is_unsigned(&self) -> bool {
        self.script_sig.is_empty()
    }
}

impl ByteFormat for BitcoinTxIn {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        let mut len = self.outpoint.serialized_length();
        len += self.script_sig.serialized_length();
        len += 4; // sequence
        len
    }

    fn read_from<T>(reader: &mut T, _limit: usize) -> SerResult<Self>
    where
        T: Read,
        Self: std::marker::Sized,
    {
        Ok(BitcoinTxIn {
            outpoint: Outpoint::read_from(reader, 0)?,
            script_sig: ScriptSig::read_from(reader, 0)?,
            sequence: Self::read_u32_le(reader)?,
        })
    }

    fn write_to<T>(&self, writer: &mut T) -> SerResult<usize>
    where
        T: Write,
    {
        let mut len = self.outpoint.write_to(writer)?;
        len += self.script_sig.write_to(writer)?;
        len += Self::write_u32_le(writer, self.sequence)?;
        Ok(len)
    }
}

/// Vin is a type alias for `Vec<BitcoinTxIn>`. A transaction's Vin is the Vector of
/// INputs, with a length prefix.
pub type Vin = Vec<BitcoinTxIn>;

#[cfg(test)]
mod test {
    use super::*;

    static NULL_OUTPOINT: &str =
        "0000000000000000000000000000000000000000000000000000000000000000ffffffff";

    #[test]
    fn it_serializes_and_derializes_outpoints() {
        let cases = [
            (
                Outpoint {
                    txid: TXID::default(),
                    idx: 0,
                },
                (0..36).map(|_| "00").collect::<String>(),
            ),
            (Outpoint::null(), NULL_OUTPOINT.to_string()),
        ];
        for case in cases.iter() {
            assert_eq!(case.0.serialized_length(), case.1.len() / 2);
            assert_eq!(case.0.serialize_hex().unwrap(), case.1);
            assert_eq!(Outpoint::deserialize_hex(&case.1).unwrap(), case.0);
        }
    }

    #[test]
    fn it_serializes_and_derializes_inputs() {
        let cases = [
            (
                BitcoinTxIn {
                    outpoint: Outpoint::null(),
                    script_sig: ScriptSig::null(),
                    sequence: 0x1234abcd,
                },
                format!("{}{}{}", NULL_OUTPOINT, "00", "cdab3412"),
            ),
            (
                BitcoinTxIn::new(Outpoint::null(), vec![], 0x11223344),
                format!("{}{}{}", NULL_OUTPOINT, "00", "44332211"),
            ),
            (
                BitcoinTxIn::unsigned(Outpoint::null()),
                format!("{}{}{}", NULL_OUTPOINT, "00", "ffffffff"),
            ),
        ];

        for case in cases.iter() {
            assert_eq!(case.0.serialized_length(), case.1.len() / 2);
            assert_eq!(case.0.serialize_hex().unwrap(), case.1);
            assert_eq!(BitcoinTxIn::deserialize_hex(&case.1).unwrap(), case.0);
        }
    }

    #[test]
    fn it_builds_outpoints_from_explorer_format() {
        let outpoint = Outpoint::from_explorer_format(
            "1ece533038831e69e6b09c89441460c6e2715db10ab94f786b8fffe266a1e622",
            0,
        )
        .unwrap();
        assert_eq!(
            outpoint.serialize_hex().unwrap(),
            "22e6a166e2ff8f6b784fb90ab15d71e2c6601444899cb0e6691e83383053ce1e00000000"
        );
        assert_eq!(
            outpoint.txid_be_hex(),
            "1ece533038831e69e6b09c89441460c6e2715db10ab94f786b8fffe266a1e622"
        );
    }
}
