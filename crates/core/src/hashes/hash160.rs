use digest::Digest;
use ripemd::Ripemd160;
use sha2::Sha256;

/// A 20-byte Bitcoin `ripemd160(sha256(x))` output. Used as the payload of PKH and SH
/// addresses.
pub type Hash160Digest = [u8; 20];

/// Compute `ripemd160(sha256(data))`.
pub fn hash160(data: &[u8]) -> Hash160Digest {
    let first = Sha256::digest(data);
    let second = Ripemd160::digest(first);
    let mut digest = Hash160Digest::default();
    digest.copy_from_slice(&second);
    digest
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_computes_hash160() {
        let cases = [
            ("", "b472a266d0bd89c13706a4132ccfb16f7c3b9fcb"),
            // witness program wrapping sha256(OP_ADD OP_7 OP_EQUAL)
            (
                "0020f5ac8d00e92b7131aae203ea7c8836842ec5fbd63f6c99c3ec1224d8adbd1075",
                "f0ca58dc8e539421a3cb4a9c22c059973075287c",
            ),
        ];
        for case in cases.iter() {
            let data = hex::decode(case.0).unwrap();
            assert_eq!(hex::encode(hash160(&data)), case.1);
        }
    }
}
