//! ECDSA sign/verify over the SHA3-512 digest of the plaintext,
//! interpreted directly as an integer (reduced modulo the group order
//! only when it enters arithmetic, never beforehand).

use num_bigint::BigUint;
use rand_core::CryptoRngCore;

use super::curve::{generator, order, Point, Scalar};
use super::hash::sha3_512;
use super::keys::{PrivateKey, PublicKey};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Signature {
    pub r: BigUint,
    pub s: BigUint,
}

fn message_integer(message: &[u8]) -> BigUint {
    BigUint::from_bytes_be(&sha3_512(message))
}

/// Sign `message` with `private_key`, retrying internally on the
/// (astronomically unlikely) `r == 0` or `s == 0` cases.
pub fn sign(private_key: &PrivateKey, message: &[u8], rng: &mut impl CryptoRngCore) -> Signature {
    let z = message_integer(message);
    let n = order();
    let k = private_key.scalar();

    loop {
        let u = Scalar::random(rng);
        let point = generator() * u;
        let r = point.x() % &n;
        if r == BigUint::from(0u32) {
            continue;
        }
        let r_scalar = Scalar::from_biguint_mod_order(&r);
        let z_scalar = Scalar::from_biguint_mod_order(&z);
        let s_scalar = match u.invert() {
            Some(u_inv) => u_inv * (z_scalar + r_scalar * k),
            None => continue,
        };
        if s_scalar.is_zero() {
            continue;
        }
        return Signature {
            r,
            s: s_scalar.to_biguint(),
        };
    }
}

/// Verify `signature` against `message` under `public_key`.
///
/// Never raises on mismatch: a malformed `(r, s)` pair (out of range)
/// is simply treated as "does not verify".
pub fn verify(public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
    let n = order();
    let zero = BigUint::from(0u32);
    if signature.r <= zero || signature.r >= n || signature.s <= zero || signature.s >= n {
        return false;
    }

    let z = message_integer(message);
    let s_scalar = Scalar::from_biguint_mod_order(&signature.s);
    let w = match s_scalar.invert() {
        Some(w) => w,
        None => return false,
    };

    let z_scalar = Scalar::from_biguint_mod_order(&z);
    let r_scalar = Scalar::from_biguint_mod_order(&signature.r);
    let u1 = z_scalar * w;
    let u2 = r_scalar * w;

    let point: Point = generator() * u1 + public_key.point() * u2;
    if point.is_identity() {
        return false;
    }
    point.x() % &n == signature.r
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::keys::PrivateKey;
    use rand_core::OsRng;

    #[test]
    fn sign_then_verify_succeeds() {
        let mut rng = OsRng;
        let key = PrivateKey::generate(&mut rng);
        let pubkey = key.public_key();
        let sig = sign(&key, b"hello world", &mut rng);
        assert!(verify(&pubkey, b"hello world", &sig));
    }

    #[test]
    fn verify_rejects_tampered_message() {
        let mut rng = OsRng;
        let key = PrivateKey::generate(&mut rng);
        let pubkey = key.public_key();
        let sig = sign(&key, b"hello world", &mut rng);
        assert!(!verify(&pubkey, b"hello wordl", &sig));
    }

    #[test]
    fn verify_rejects_wrong_key() {
        let mut rng = OsRng;
        let key = PrivateKey::generate(&mut rng);
        let other = PrivateKey::generate(&mut rng);
        let sig = sign(&key, b"hello world", &mut rng);
        assert!(!verify(&other.public_key(), b"hello world", &sig));
    }

    #[test]
    fn verify_rejects_out_of_range_signature() {
        let mut rng = OsRng;
        let key = PrivateKey::generate(&mut rng);
        let pubkey = key.public_key();
        let sig = Signature {
            r: order(),
            s: BigUint::from(1u32),
        };
        assert!(!verify(&pubkey, b"anything", &sig));
    }
}
