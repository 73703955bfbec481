//! A simple trait for binary (de)Serialization using std `Read` and `Write` traits.

use std::io::{Cursor, Error as IOError, Read, Write};

use thiserror::Error;

/// Errors related to serialization of types.
#[derive(Debug, Error)]
pub enum SerError {
    /// Compact ints must be minimally encoded.
    #[error("Attempted to deserialize non-minimal VarInt. Someone is doing something fishy.")]
    NonMinimalVarInt,

    /// IOError bubbled up from a `Write` passed to a `ByteFormat::write_to` implementation.
    #[error(transparent)]
    IOError(#[from] IOError),

    /// `deserialize_hex` encountered an error on its input.
    #[error(transparent)]
    FromHexError(#[from] hex::FromHexError),

    /// A digest was read from a hex string of the wrong length.
    #[error("Expected a {expected}-byte digest. Got {got} bytes.")]
    WrongDigestLength {
        /// The digest length of the target type
        expected: usize,
        /// The number of bytes actually decoded
        got: usize,
    },
}

/// Type alias for serialization errors
pub type SerResult<T> = Result<T, SerError>;

/// Calculates the minimum prefix length for a VarInt encoding `number`
pub fn prefix_byte_len(number: u64) -> u8 {
    match number {
        0..=0xfc => 1,
        0xfd..=0xffff => 3,
        0x10000..=0xffff_ffff => 5,
        _ => 9,
    }
}

/// Matches the length of the VarInt to the 1-byte flag
pub fn first_byte_from_len(number: u8) -> Option<u8> {
    match number {
        3 => Some(0xfd),
        5 => Some(0xfe),
        9 => Some(0xff),
        _ => None,
    }
}

/// Matches the VarInt prefix flag to the serialized length
pub fn prefix_len_from_first_byte(number: u8) -> u8 {
    match number {
        0..=0xfc => 1,
        0xfd => 3,
        0xfe => 5,
        0xff => 9,
    }
}

/// Write a Bitcoin compact int to the writer. Returns the number of bytes written.
pub fn write_compact_int<W>(writer: &mut W, number: u64) -> SerResult<usize>
where
    W: Write,
{
    let prefix_len = prefix_byte_len(number);
    let written: usize = match first_byte_from_len(prefix_len) {
        None => {
            writer.write_all(&[number as u8])?;
            1
        }
        Some(prefix) => {
            let body = number.to_le_bytes();
            writer.write_all(&[prefix])?;
            writer.write_all(&body[..prefix_len as usize - 1])?;
            prefix_len as usize
        }
    };
    Ok(written)
}

/// Read a Bitcoin compact int from the reader. Rejects non-minimal encodings.
pub fn read_compact_int<R>(reader: &mut R) -> SerResult<u64>
where
    R: Read,
{
    let mut prefix = [0u8; 1];
    reader.read_exact(&mut prefix)?; // read at most one byte
    let prefix_len = prefix_len_from_first_byte(prefix[0]);

    // Get the byte(s) representing the number, and parse as u64
    let number = if prefix_len > 1 {
        let mut buf = [0u8; 8];
        reader.read_exact(&mut buf[..prefix_len as usize - 1])?;
        u64::from_le_bytes(buf)
    } else {
        prefix[0] as u64
    };

    if prefix_byte_len(number) < prefix_len {
        Err(SerError::NonMinimalVarInt)
    } else {
        Ok(number)
    }
}

/// A simple trait for deserializing from `std::io::Read` and serializing to `std::io::Write`.
///
/// `ByteFormat` is used for txid calculations, and transaction serialization and
/// deserialization.
pub trait ByteFormat {
    /// An associated error type
    type Error: From<SerError> + From<IOError> + std::error::Error;

    /// Returns the byte-length of the serialized data structure.
    fn serialized_length(&self) -> usize;

    /// Convenience function for reading a LE u32
    fn read_u32_le<R>(reader: &mut R) -> Result<u32, Self::Error>
    where
        R: Read,
    {
        let mut buf = [0u8; 4];
        reader.read_exact(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Convenience function for reading a LE u64
    fn read_u64_le<R>(reader: &mut R) -> Result<u64, Self::Error>
    where
        R: Read,
    {
        let mut buf = [0u8; 8];
        reader.read_exact(&mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }

    /// Convenience function for writing a LE u32
    fn write_u32_le<W>(writer: &mut W, number: u32) -> Result<usize, Self::Error>
    where
        W: Write,
    {
        writer.write_all(&number.to_le_bytes())?;
        Ok(4)
    }

    /// Convenience function for writing a LE u64
    fn write_u64_le<W>(writer: &mut W, number: u64) -> Result<usize, Self::Error>
    where
        W: Write,
    {
        writer.write_all(&number.to_le_bytes())?;
        Ok(8)
    }

    /// Read a compact-int-prefixed vector of `ByteFormat` items.
    fn read_prefix_vec<R, E, I>(reader: &mut R) -> Result<Vec<I>, E>
    where
        R: Read,
        E: From<SerError> + From<IOError> + std::error::Error,
        I: ByteFormat<Error = E>,
    {
        let items = read_compact_int(reader)?;
        // the prefix is untrusted. Don't preallocate from it.
        let mut v = vec![];
        for _ in 0..items {
            v.push(I::read_from(reader, 0)?);
        }
        Ok(v)
    }

    /// Write a compact-int-prefixed vector of `ByteFormat` items.
    fn write_prefix_vec<W, E, I>(writer: &mut W, vector: &[I]) -> Result<usize, E>
    where
        W: Write,
        E: From<SerError> + From<IOError> + std::error::Error,
        I: ByteFormat<Error = E>,
    {
        let mut written = write_compact_int(writer, vector.len() as u64)?;
        for item in vector.iter() {
            written += item.write_to(writer)?;
        }
        Ok(written)
    }

    /// Deserializes an instance of `Self` from a `std::io::Read`.
    /// The `limit` argument is used only when deserializing collections, and specifies a maximum
    /// number of instances of the underlying type to read.
    ///
    /// ```
    /// use escrow_core::ser::*;
    ///
    /// let mut b = [1u8, 2, 3];
    /// let result = u8::read_from(&mut b.as_ref(), 0).unwrap();
    ///
    /// assert_eq!(result, 1);
    /// ```
    fn read_from<R>(reader: &mut R, limit: usize) -> Result<Self, Self::Error>
    where
        R: Read,
        Self: std::marker::Sized;

    /// Decodes a hex string to a `Vec<u8>`, deserializes an instance of `Self` from that vector.
    fn deserialize_hex(s: &str) -> Result<Self, Self::Error>
    where
        Self: std::marker::Sized,
    {
        let v: Vec<u8> = hex::decode(s).map_err(SerError::from)?;
        let mut cursor = Cursor::new(v);
        Self::read_from(&mut cursor, 0)
    }

    /// Serializes `Self` to a `std::io::Write`. Following `Write` trait conventions, its `Ok`
    /// type is a `usize` denoting the number of bytes written.
    ///
    /// ```
    /// use escrow_core::ser::*;
    ///
    /// let mut buf: Vec<u8> = vec![];
    /// let written = 7u8.write_to(&mut buf).unwrap();
    ///
    /// assert_eq!(written, 1);
    /// assert_eq!(buf, vec![7u8]);
    /// ```
    fn write_to<W>(&self, writer: &mut W) -> Result<usize, Self::Error>
    where
        W: Write;

    /// Serializes `self` to a vector, returns the hex-encoded vector
    fn serialize_hex(&self) -> Result<String, Self::Error> {
        let mut v: Vec<u8> = vec![];
        self.write_to(&mut v)?;
        Ok(hex::encode(v))
    }
}

impl ByteFormat for u8 {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        1
    }

    fn read_from<R>(reader: &mut R, _limit: usize) -> SerResult<Self>
    where
        R: Read,
        Self: std::marker::Sized,
    {
        let mut buf = [0u8; 1];
        reader.read_exact(&mut buf)?;
        Ok(u8::from_le_bytes(buf))
    }

    fn write_to<W>(&self, writer: &mut W) -> SerResult<usize>
    where
        W: Write,
    {
        writer.write_all(&self.to_le_bytes())?;
        Ok(1)
    }
}
