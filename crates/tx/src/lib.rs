//! Builds unsigned escrow funding transactions for Bitcoin networks.
//!
//! Funds are locked to a P2SH-wrapped P2WSH address derived from an arbitrary witness script.
//! The funding transaction spends the seller's inputs and pays, in order, the escrow address,
//! the third-party fee, and the change back to the seller. The result is a legacy-format raw
//! transaction hex string, ready to be signed elsewhere.
//!
//! ```
//! use escrow_tx::prelude::*;
//!
//! // OP_ADD OP_7 OP_EQUAL
//! let address = derive_script_address(&[0x93, 0x57, 0x87], Network::Test);
//! assert_eq!(address, "2NFCQZeVoMTjKUc3nxrx4w72xHnb6DJu6Jy");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(unused_extern_crates)]

#[macro_use]
extern crate escrow_core;

pub mod amount;
pub mod builder;
pub mod defaults;
pub mod derive;
pub mod enc;
pub mod escrow;
pub mod hashes;
pub mod nets;
pub mod params;
pub mod prelude;
pub mod types;

pub use amount::{Amount, AmountError};
pub use builder::BitcoinTxBuilder;
pub use derive::{derive_script_address, ScriptAddress};
pub use enc::*;
pub use escrow::{build_checked, build_transaction, build_unsigned_tx, BuildError};
pub use hashes::*;
pub use nets::*;
pub use params::{validate, BuilderParams, FundingVin, ParamError};
pub use types::*;
