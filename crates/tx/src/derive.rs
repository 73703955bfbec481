//! Derivation of P2SH-wrapped P2WSH addresses from witness scripts.
//!
//! The witness script is committed to by its sha256. That digest becomes a version 0 witness
//! program (`OP_0 PUSH32 <digest>`), which is used as the redeem script of an ordinary P2SH
//! output. Funds sent to the resulting address can later be spent by revealing the redeem
//! script in the script sig and the witness script in the witness.

use escrow_core::{
    enc::encode_base58,
    hashes::{hash160, sha256, Hash160Digest, Sha256Digest},
};

use crate::{
    enc::Address,
    nets::Network,
    types::script::{Script, ScriptPubkey},
};

/// Every artifact of a script address derivation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptAddress {
    /// `sha256(witness_script)`
    pub witness_script_hash: Sha256Digest,
    /// `OP_0 PUSH32 <witness_script_hash>`. Must be revealed when spending.
    pub redeem_script: Script,
    /// `ripemd160(sha256(redeem_script))`
    pub redeem_script_hash: Hash160Digest,
    /// `OP_HASH160 PUSH20 <redeem_script_hash> OP_EQUAL`
    pub script_pubkey: ScriptPubkey,
    /// The base58check SH address on the selected network.
    pub address: Address,
}

impl ScriptAddress {
    /// Derive the P2SH-wrapped P2WSH address of `witness_script` on `network`.
    pub fn derive(witness_script: &[u8], network: Network) -> Self {
        let witness_script_hash = sha256(witness_script);
        let redeem_script = Script::from(&ScriptPubkey::p2wsh(&witness_script_hash));
        let redeem_script_hash = hash160(redeem_script.items());
        let script_pubkey = ScriptPubkey::p2sh(&redeem_script_hash);
        let address = Address::Sh(encode_base58(network.sh_version(), &redeem_script_hash));
        Self {
            witness_script_hash,
            redeem_script,
            redeem_script_hash,
            script_pubkey,
            address,
        }
    }

    /// The address string.
    pub fn as_str(&self) -> &str {
        self.address.as_str()
    }
}

/// Derive the P2SH-wrapped P2WSH address string for `script` on `network`.
///
/// Any byte sequence is accepted, including the empty script. The result is deterministic.
pub fn derive_script_address(script: &[u8], network: Network) -> String {
    ScriptAddress::derive(script, network).address.as_string()
}
