//! SHA3-512 and SHAKE256, as thin wrappers over the `sha3` crate.

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Digest, Sha3_512, Shake256};

/// SHA3-512 of `data`, fixed 64-byte output.
pub fn sha3_512(data: &[u8]) -> [u8; 64] {
    let mut hasher = Sha3_512::new();
    hasher.update(data);
    let digest = hasher.finalize();
    let mut out = [0u8; 64];
    out.copy_from_slice(&digest);
    out
}

/// SHAKE256 of `data`, squeezing exactly `out_len` bytes.
pub fn shake256(data: &[u8], out_len: usize) -> Vec<u8> {
    let mut hasher = Shake256::default();
    hasher.update(data);
    let mut reader = hasher.finalize_xof();
    let mut out = vec![0u8; out_len];
    reader.read(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha3_512_is_deterministic_and_sized() {
        let a = sha3_512(b"fincrypt");
        let b = sha3_512(b"fincrypt");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn shake256_output_length_is_honored() {
        assert_eq!(shake256(b"x", 0).len(), 0);
        assert_eq!(shake256(b"x", 17).len(), 17);
        assert_eq!(shake256(b"x", 1000).len(), 1000);
    }

    #[test]
    fn shake256_is_deterministic() {
        assert_eq!(shake256(b"abc", 32), shake256(b"abc", 32));
    }
}
