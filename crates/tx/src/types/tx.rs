//! The unsigned Bitcoin transaction type and its error type.

use std::io::{Error as IOError, Read, Write};

use thiserror::Error;

use escrow_core::{
    hashes::{Hash256Writer, MarkedDigestWriter},
    ser::{self, ByteFormat, SerError},
};

use crate::{
    hashes::TXID,
    types::{
        txin::{BitcoinTxIn, Vin},
        txout::{TxOut, Vout},
    },
};

/// An Error type for transaction objects
#[derive(Debug, Error)]
pub enum TxError {
    /// Serialization-related errors
    #[error(transparent)]
    SerError(#[from] SerError),

    /// IOError bubbled up from a `Write` passed to a `ByteFormat::write_to` implementation.
    #[error(transparent)]
    IOError(#[from] IOError),

    /// Got a segwit marker and flag where we expected the output vector. Witness transactions
    /// can't be represented by `UnsignedTx`.
    #[error("Witness transactions are not supported")]
    WitnessNotSupported,
}

/// Type alias for result with TxError
pub type TxResult<T> = Result<T, TxError>;

/// An unsigned, legacy-serialized Bitcoin transaction. No segwit marker, flag, or witness data
/// is ever written, regardless of the version number.
#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct UnsignedTx {
    /// The version number. Usually 1 or 2.
    pub(crate) version: u32,
    /// The vector of inputs
    pub(crate) vin: Vin,
    /// The vector of outputs
    pub(crate) vout: Vout,
    /// The nLocktime field.
    pub(crate) locktime: u32,
}

impl UnsignedTx {
    /// Instantiate a new transaction
    pub fn new(version: u32, vin: Vin, vout: Vout, locktime: u32) -> Self {
        Self {
            version,
            vin,
            vout,
            locktime,
        }
    }

    /// Return a reference to a slice of the inputs
    pub fn inputs(&self) -> &[BitcoinTxIn] {
        &self.vin
    }

    /// Return a reference to a slice of the outputs
    pub fn outputs(&self) -> &[TxOut] {
        &self.vout
    }

    /// Return the version number
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Return the nLocktime
    pub fn locktime(&self) -> u32 {
        self.locktime
    }

    /// True if no input carries a script sig.
    pub fn is_unsigned(&self) -> bool {
        self.vin.iter().all(BitcoinTxIn::is_unsigned)
    }

    /// Sum of the output values. `None` on overflow.
    pub fn total_output_value(&self) -> Option<u64> {
        self.vout
            .iter()
            .try_fold(0u64, |acc, out| acc.checked_add(out.value))
    }

    /// Calculate the transaction id: the double-sha2 of the serialized transaction. Use
    /// `to_be_hex` on the result for the block explorer format.
    pub fn txid(&self) -> TxResult<TXID> {
        let mut w = Hash256Writer::default();
        self.write_to(&mut w)?;
        Ok(w.finish_marked())
    }
}

impl ByteFormat for UnsignedTx {
    type Error = TxError;

    fn serialized_length(&self) -> usize {
        let mut len = 4; // version
        len += ser::prefix_byte_len(self.vin.len() as u64) as usize;
        len += self.vin.iter().map(ByteFormat::serialized_length).sum::<usize>();
        len += ser::prefix_byte_len(self.vout.len() as u64) as usize;
        len += self.vout.iter().map(ByteFormat::serialized_length).sum::<usize>();
        len += 4; // locktime
        len
    }

    fn read_from<R>(reader: &mut R, _limit: usize) -> Result<Self, Self::Error>
    where
        R: Read,
        Self: std::marker::Sized,
    {
        let version = Self::read_u32_le(reader)?;

        let vin_len = ser::read_compact_int(reader)?;
        let mut vin = vec![];
        for _ in 0..vin_len {
            vin.push(BitcoinTxIn::read_from(reader, 0)?);
        }

        let vout_len = ser::read_compact_int(reader)?;
        // an empty vin followed by 0x01 is the segwit marker and flag
        if vin_len == 0 && vout_len == 1 {
            return Err(TxError::WitnessNotSupported);
        }
        let mut vout = vec![];
        for _ in 0..vout_len {
            vout.push(TxOut::read_from(reader, 0)?);
        }

        let locktime = Self::read_u32_le(reader)?;
        Ok(Self {
            version,
            vin,
            vout,
            locktime,
        })
    }

    fn write_to<W>(&self, writer: &mut W) -> Result<usize, Self::Error>
    where
        W: Write,
    {
        let mut len = Self::write_u32_le(writer, self.version)?;
        len += Self::write_prefix_vec(writer, &self.vin)?;
        len += Self::write_prefix_vec(writer, &self.vout)?;
        len += Self::write_u32_le(writer, self.locktime)?;
        Ok(len)
    }
}

impl_hex_serde!(UnsignedTx);

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::txin::Outpoint;

    static FIXTURE_TX: &str = "020000000122e6a166e2ff8f6b784fb90ab15d71e2c6601444899cb0e6691e83383053ce1e0000000000ffffffff0300c2eb0b0000000017a914f0ca58dc8e539421a3cb4a9c22c059973075287c8780841e000000000017a9147b501956506de428717e46d21db34065dc26d9788770f7c2110000000017a9143e36c73d865cbeec91069a23c4c0dd1e43a0034f8700000000";

    #[test]
    fn it_parses_and_reserializes_unsigned_txns() {
        let tx = UnsignedTx::deserialize_hex(FIXTURE_TX).unwrap();
        assert_eq!(tx.version(), 2);
        assert_eq!(tx.locktime(), 0);
        assert_eq!(tx.inputs().len(), 1);
        assert_eq!(tx.outputs().len(), 3);
        assert!(tx.is_unsigned());
        assert_eq!(tx.inputs()[0].sequence, 0xffff_ffff);
        assert_eq!(
            tx.inputs()[0].outpoint.txid_be_hex(),
            "1ece533038831e69e6b09c89441460c6e2715db10ab94f786b8fffe266a1e622"
        );
        let values: Vec<u64> = tx.outputs().iter().map(|o| o.value).collect();
        assert_eq!(values, vec![200_000_000, 2_000_000, 297_990_000]);
        assert_eq!(tx.total_output_value(), Some(499_990_000));

        assert_eq!(tx.serialized_length(), FIXTURE_TX.len() / 2);
        assert_eq!(tx.serialize_hex().unwrap(), FIXTURE_TX);
    }

    #[test]
    fn it_calculates_txids() {
        let tx = UnsignedTx::deserialize_hex(FIXTURE_TX).unwrap();
        assert_eq!(
            tx.txid().unwrap().to_be_hex(),
            "b1a45947fe89937d541aa912a7becaa71d2d31ea37069236e0df29388a907f84"
        );
    }

    #[test]
    fn it_serializes_empty_txns() {
        let tx = UnsignedTx::new(1, vec![], vec![], 0);
        assert_eq!(tx.serialize_hex().unwrap(), "01000000000000000000");
        assert_eq!(tx.serialized_length(), 10);
    }

    #[test]
    fn it_rejects_witness_txns() {
        // version, marker, flag, then the start of a vin
        let witness_prefix = "0200000000010122e6a166";
        match UnsignedTx::deserialize_hex(witness_prefix) {
            Err(TxError::WitnessNotSupported) => {}
            other => panic!("expected WitnessNotSupported, got {:?}", other),
        }
    }

    #[test]
    fn it_round_trips_through_serde() {
        let tx = UnsignedTx::new(
            1,
            vec![BitcoinTxIn::unsigned(Outpoint::default())],
            vec![TxOut::new(5, vec![0x51])],
            0,
        );
        let json = serde_json::to_string(&tx).unwrap();
        let parsed: UnsignedTx = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, tx);
    }
}
