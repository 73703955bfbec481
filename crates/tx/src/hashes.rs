//! This module holds `MarkedDigest` types used by Bitcoin transactions. Currently we represent
//! only `TXID`s.

mark_hash256!(
    /// A marked Hash256Digest representing transaction IDs
    TXID
);

#[cfg(test)]
mod test {
    use super::*;
    use escrow_core::ser::ByteFormat;

    #[test]
    fn it_serializes_and_derializes_hash256digests() {
        let cases = [(
            TXID::default(),
            "0000000000000000000000000000000000000000000000000000000000000000",
        )];
        for case in cases.iter() {
            let digest = TXID::deserialize_hex(case.1).unwrap();
            assert_eq!(digest.serialized_length(), 32);
            assert_eq!(digest, case.0);
            assert_eq!(digest.serialize_hex().unwrap(), case.1);
            assert_eq!(case.0.serialize_hex().unwrap(), case.1);
        }
    }

    #[test]
    fn it_derives_serde_for_marked_digests() {
        let txid = TXID::from_be_hex(
            "1ece533038831e69e6b09c89441460c6e2715db10ab94f786b8fffe266a1e622",
        )
        .unwrap();
        let json = serde_json::to_string(&txid).unwrap();
        assert_eq!(serde_json::from_str::<TXID>(&json).unwrap(), txid);
    }

    #[test]
    fn it_reverses_explorer_format() {
        let be = "1ece533038831e69e6b09c89441460c6e2715db10ab94f786b8fffe266a1e622";
        let txid = TXID::from_be_hex(be).unwrap();
        assert_eq!(
            txid.serialize_hex().unwrap(),
            "22e6a166e2ff8f6b784fb90ab15d71e2c6601444899cb0e6691e83383053ce1e"
        );
        assert_eq!(txid.to_be_hex(), be);
    }

    #[test]
    fn it_rejects_short_explorer_txids() {
        assert!(TXID::from_be_hex("1ece5330").is_err());
        assert!(TXID::from_be_hex("zz").is_err());
    }
}
