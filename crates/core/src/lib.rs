//! # Escrow Core
//!
//! `escrow-core` contains the primitive layer used by the `escrow-tx` crate.
//!
//! ## Crate Layout
//!
//! ### Hashes
//!
//! The hashes module provides utilities for newtyping hash outputs. These
//! newtypes are called `Marked__` and are intended to be used for a specific
//! purpose. E.g. `Hash256Digest` is Bitcoin's double-sha2, while
//! `Hash160Digest` is Bitcoin's `ripemd160(sha2(x))`.
//!
//! #### ByteFormat trait
//!
//! The `ByteFormat` trait is a simple serialization API using
//! `std::io::{Read, Write}`. Implementers define the binary serialization
//! format of the type. It also carries the Bitcoin compact-size (VarInt)
//! helpers used for every length prefix on the wire.
//!
//! `ByteFormat` has an associated `Error` type. Most basic types can simply use
//! the provided `SerError`. More complex (de)serialization will want a custom
//! error type. These types must be easily instantiated from a `SerError` or an
//! `std::io::Error`.
//!
//! ### Enc
//!
//! The `enc` module defines the `AddressEncoder` trait and the base58check
//! helpers used to move between addresses and their hash payloads.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(unused_extern_crates)]

#[macro_use]
pub mod macros;

pub mod enc;
pub mod hashes;
pub mod ser;

pub use enc::*;
pub use hashes::*;
pub use ser::*;

pub use hex;
