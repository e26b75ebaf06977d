//! SHAKE256-based all-or-nothing padding.
//!
//! Two-round Feistel mask, little-endian XOR, fixed 32-byte nonce
//! overhead. There is no authentication baked into this construction —
//! it exists purely to make the hybrid-encrypted plaintext
//! indistinguishable from random before it reaches AES-CBC, same as the
//! reference implementation's `oaep.py`.

use super::hash::shake256;

/// Bytes of random nonce carried by the padded blob.
pub const APPEND_LENGTH: usize = 32;

fn xor_le(a: &[u8], b: &[u8]) -> Vec<u8> {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| x ^ y).collect()
}

/// Pad `msg`, drawing a fresh nonce via `rng`.
pub fn pad(msg: &[u8], rng: &mut impl rand_core::CryptoRngCore) -> Vec<u8> {
    let mut r = [0u8; APPEND_LENGTH];
    rng.fill_bytes(&mut r);
    pad_with_nonce(msg, &r)
}

/// Pad `msg` with an explicit nonce. Exposed for deterministic tests;
/// production callers should use [`pad`].
pub fn pad_with_nonce(msg: &[u8], nonce: &[u8; APPEND_LENGTH]) -> Vec<u8> {
    let x = xor_le(msg, &shake256(nonce, msg.len()));
    let y = xor_le(nonce, &shake256(&x, APPEND_LENGTH));
    let mut out = Vec::with_capacity(x.len() + y.len());
    out.extend_from_slice(&x);
    out.extend_from_slice(&y);
    out
}

/// Recover the original message from a padded blob.
///
/// Returns `None` if `blob` is shorter than the fixed nonce overhead.
pub fn unpad(blob: &[u8]) -> Option<Vec<u8>> {
    if blob.len() < APPEND_LENGTH {
        return None;
    }
    let split = blob.len() - APPEND_LENGTH;
    let (x, y) = blob.split_at(split);
    let r = xor_le(y, &shake256(x, APPEND_LENGTH));
    let msg = xor_le(x, &shake256(&r, x.len()));
    Some(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_unpad_round_trips() {
        let nonce = [7u8; APPEND_LENGTH];
        for msg in [&b""[..], b"a", b"hello world", &[0u8; 100]] {
            let padded = pad_with_nonce(msg, &nonce);
            assert_eq!(padded.len(), msg.len() + APPEND_LENGTH);
            assert_eq!(unpad(&padded).unwrap(), msg);
        }
    }

    #[test]
    fn different_nonces_produce_different_ciphertext_prefix() {
        let a = pad_with_nonce(b"same message", &[1u8; APPEND_LENGTH]);
        let b = pad_with_nonce(b"same message", &[2u8; APPEND_LENGTH]);
        assert_ne!(a, b);
    }

    #[test]
    fn unpad_rejects_too_short_input() {
        assert!(unpad(&[0u8; 10]).is_none());
    }

    #[test]
    fn pad_with_rng_round_trips() {
        use rand_core::OsRng;
        let mut rng = OsRng;
        let padded = pad(b"random nonce path", &mut rng);
        assert_eq!(unpad(&padded).unwrap(), b"random nonce path");
    }
}
