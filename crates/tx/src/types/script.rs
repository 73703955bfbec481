//! Simple types for Bitcoin Script, each of which is treated as an opaque, wrapped `Vec<u8>`
//! instance.
//!
//! We do not handle assembly, disassembly, or Script execution. Escrow witness scripts are
//! compiled elsewhere and arrive here as opaque bytes. The only scripts built in this crate are
//! the standard output templates (PKH, SH, and the version 0 witness program used as a redeem
//! script).
//!
//! Scripts can be freely converted between eachother using `From` and `Into`. This merely
//! rewraps the underlying `Vec<u8>` in the new type.

use escrow_core::hashes::{Hash160Digest, Sha256Digest};

wrap_prefixed_byte_vector!(
    /// A Script is a marked `Vec<u8>` holding an arbitrary script program. The witness script of
    /// an escrow is a `Script`.
    ///
    /// `Script::null()` and `Script::default()` return the empty byte vector with a 0
    /// prefix, which represents numerical 0, boolean `false`, or null bytestring.
    Script
);
wrap_prefixed_byte_vector!(
    /// A ScriptSig is a marked `Vec<u8>` for use in the script_sig. Unsigned transactions always
    /// carry the empty `ScriptSig`.
    ///
    /// `ScriptSig::null()` and `ScriptSig::default()` return the empty byte vector with a 0
    /// prefix, which represents numerical 0, boolean `false`, or null bytestring.
    ScriptSig
);
wrap_prefixed_byte_vector!(
    /// A ScriptPubkey is a marked `Vec<u8>` for use as the locking script of a TxOut.
    ///
    /// `ScriptPubkey::null()` and `ScriptPubkey::default()` return the empty byte vector with a 0
    /// prefix, which represents numerical 0, boolean `false`, or null bytestring.
    ScriptPubkey
);

impl_script_conversion!(Script, ScriptPubkey);
impl_script_conversion!(Script, ScriptSig);
impl_script_conversion!(ScriptPubkey, ScriptSig);

/// OP_0, also the version 0 witness program marker
pub const OP_0: u8 = 0x00;
/// Push the next 20 bytes
pub const OP_PUSHBYTES_20: u8 = 0x14;
/// Push the next 32 bytes
pub const OP_PUSHBYTES_32: u8 = 0x20;
/// OP_DUP
pub const OP_DUP: u8 = 0x76;
/// OP_EQUAL
pub const OP_EQUAL: u8 = 0x87;
/// OP_EQUALVERIFY
pub const OP_EQUALVERIFY: u8 = 0x88;
/// OP_HASH160
pub const OP_HASH160: u8 = 0xa9;
/// OP_CHECKSIG
pub const OP_CHECKSIG: u8 = 0xac;

/// Standard script types, and a non-standard type for all other scripts.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum ScriptType {
    /// Pay to Pubkeyhash.
    Pkh(Hash160Digest),
    /// Pay to Scripthash.
    Sh(Hash160Digest),
    /// Pay to Witness Scripthash.
    Wsh(Sha256Digest),
    /// Nonstandard or unknown `Script` type. May be a newer witness version.
    NonStandard,
}

impl ScriptPubkey {
    /// Instantiate a standard p2pkh script pubkey from a pubkey hash.
    pub fn p2pkh(digest: &Hash160Digest) -> Self {
        let mut v: Vec<u8> = vec![OP_DUP, OP_HASH160, OP_PUSHBYTES_20];
        v.extend(digest);
        v.extend(&[OP_EQUALVERIFY, OP_CHECKSIG]);
        v.into()
    }

    /// Instantiate a standard p2sh script pubkey from a script hash.
    pub fn p2sh(digest: &Hash160Digest) -> Self {
        let mut v: Vec<u8> = vec![OP_HASH160, OP_PUSHBYTES_20];
        v.extend(digest);
        v.push(OP_EQUAL);
        v.into()
    }

    /// Instantiate a version 0 witness program committing to the sha256 of a witness script.
    /// Used bare as a p2wsh script pubkey, or as the redeem script of a p2sh-wrapped p2wsh.
    pub fn p2wsh(digest: &Sha256Digest) -> Self {
        let mut v: Vec<u8> = vec![OP_0, OP_PUSHBYTES_32];
        v.extend(digest);
        v.into()
    }

    /// Inspect the `Script` to determine its type.
    pub fn standard_type(&self) -> ScriptType {
        let items = &self.0;
        match self.0.len() {
            0x19 => {
                // PKH
                if items[0..3] == [OP_DUP, OP_HASH160, OP_PUSHBYTES_20]
                    && items[0x17..] == [OP_EQUALVERIFY, OP_CHECKSIG]
                {
                    let mut digest = Hash160Digest::default();
                    digest.copy_from_slice(&items[3..23]);
                    ScriptType::Pkh(digest)
                } else {
                    ScriptType::NonStandard
                }
            }
            0x17 => {
                // SH
                if items[0..2] == [OP_HASH160, OP_PUSHBYTES_20] && items[0x16..] == [OP_EQUAL] {
                    let mut digest = Hash160Digest::default();
                    digest.copy_from_slice(&items[2..22]);
                    ScriptType::Sh(digest)
                } else {
                    ScriptType::NonStandard
                }
            }
            0x22 => {
                // WSH
                if items[0..2] == [OP_0, OP_PUSHBYTES_32] {
                    let mut digest = Sha256Digest::default();
                    digest.copy_from_slice(&items[2..34]);
                    ScriptType::Wsh(digest)
                } else {
                    ScriptType::NonStandard
                }
            }
            _ => ScriptType::NonStandard,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use escrow_core::ser::ByteFormat;

    #[test]
    fn it_serializes_and_derializes_scripts() {
        let cases = [
            (
                Script::new(hex::decode("0014758ce550380d964051086798d6546bebdca27a73").unwrap()),
                "160014758ce550380d964051086798d6546bebdca27a73",
                22,
            ),
            (Script::new(vec![]), "00", 0),
            (Script::null(), "00", 0),
        ];
        for case in cases.iter() {
            let prevout_script = Script::deserialize_hex(case.1).unwrap();
            assert_eq!(case.0.serialize_hex().unwrap(), case.1);
            assert_eq!(case.0.len(), case.2);
            assert_eq!(case.0.is_empty(), case.2 == 0);

            assert_eq!(prevout_script, case.0);
            assert_eq!(prevout_script.serialized_length(), case.1.len() / 2);
        }
    }

    #[test]
    fn it_converts_between_bitcoin_script_types() {
        let sc = Script::new(hex::decode("a914e88869b88866281ab166541ad8aafba8f8aba47a87").unwrap());
        let spk = ScriptPubkey::from(&sc);
        let ss = ScriptSig::from(&spk);
        assert_eq!(Script::from(&ss), sc);
        assert_eq!(spk.items(), sc.items());
    }

    #[test]
    fn it_builds_standard_templates() {
        let h20 = [0x11u8; 20];
        let h32 = [0x22u8; 32];
        assert_eq!(
            hex::encode(ScriptPubkey::p2pkh(&h20).items()),
            format!("76a914{}88ac", "11".repeat(20))
        );
        assert_eq!(
            hex::encode(ScriptPubkey::p2sh(&h20).items()),
            format!("a914{}87", "11".repeat(20))
        );
        assert_eq!(
            hex::encode(ScriptPubkey::p2wsh(&h32).items()),
            format!("0020{}", "22".repeat(32))
        );
        assert_eq!(ScriptPubkey::p2pkh(&h20).standard_type(), ScriptType::Pkh(h20));
        assert_eq!(ScriptPubkey::p2sh(&h20).standard_type(), ScriptType::Sh(h20));
        assert_eq!(ScriptPubkey::p2wsh(&h32).standard_type(), ScriptType::Wsh(h32));
    }

    #[test]
    fn it_determines_script_pubkey_types_accurately() {
        let cases = [
            ("a914e88869b88866281ab166541ad8aafba8f8aba47a87", true, "sh"),
            ("a914e88869b88866281ab166541ad8aafba8f8aba47a89", false, "wrong last byte"),
            ("aa14e88869b88866281ab166541ad8aafba8f8aba47a87", false, "wrong first byte"),
            ("76a9140e5c3c8d420c7f11e88d76f7b860d471e6517a4488ac", true, "pkh"),
            ("76a9140e5c3c8d420c7f11e88d76f7b860d471e6517a4488ad", false, "wrong last byte"),
            ("00201bf8a1831db5443b42a44f30a121d1b616d011ab15df62b588722a845864cc99", true, "wsh"),
            ("01201bf8a1831db5443b42a44f30a121d1b616d011ab15df62b588722a845864cc99", false, "witness version"),
            ("00141bf8a1831db5443b42a44f30a121d1b616d011ab", false, "wpkh is not classified"),
            ("6a03aabbcc", false, "op_return is not classified"),
            ("0011223344", false, "junk"),
            ("deadbeefdeadbeefdeadbeefdeadbeef", false, "junk"),
        ];

        for case in cases.iter() {
            let script = ScriptPubkey::new(hex::decode(case.0).unwrap());
            assert_eq!(
                script.standard_type() != ScriptType::NonStandard,
                case.1,
                "{}",
                case.2
            );
        }
    }
}
