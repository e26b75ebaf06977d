//! Key types. Public keys are plain values; private keys hold their
//! scalar behind a zeroizing, non-`Debug`-leaking wrapper.

use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use secrecy::{ExposeSecret, SecretBox};

use super::curve::{generator, order, Point, Scalar};
use super::error::{Error, Result};

/// A public point on the curve, with no attached identity metadata.
#[derive(Clone, Copy, Debug)]
pub struct PublicKey {
    point: Point,
}

impl PublicKey {
    pub fn from_point(point: Point) -> Self {
        Self { point }
    }

    pub fn point(&self) -> Point {
        self.point
    }

    pub fn xy(&self) -> (BigUint, BigUint) {
        self.point.xy()
    }
}

/// A private scalar. The scalar's big-endian bytes are held behind a
/// `SecretBox`, which zeroizes them on drop and refuses to print them
/// through `Debug`.
pub struct PrivateKey {
    secret: SecretBox<[u8; 32]>,
}

impl PrivateKey {
    pub fn generate(rng: &mut impl CryptoRngCore) -> Self {
        let scalar = Scalar::random(rng);
        Self::from_scalar(scalar)
    }

    /// Build a private key from a raw scalar, rejecting anything outside
    /// the valid range `0 < k < n` rather than silently reducing it.
    pub fn from_biguint(value: &BigUint) -> Result<Self> {
        if value == &BigUint::from(0u32) || value >= &order() {
            return Err(Error::MalformedKey("private scalar out of range".into()));
        }
        Ok(Self::from_scalar(Scalar::from_biguint_mod_order(value)))
    }

    fn from_scalar(scalar: Scalar) -> Self {
        let bytes = scalar.to_biguint().to_bytes_be();
        let mut buf = [0u8; 32];
        buf[32 - bytes.len()..].copy_from_slice(&bytes);
        Self {
            secret: SecretBox::new(Box::new(buf)),
        }
    }

    pub fn scalar(&self) -> Scalar {
        Scalar::from_biguint_mod_order(&BigUint::from_bytes_be(self.secret.expose_secret()))
    }

    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(self.secret.expose_secret())
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_point(generator() * self.scalar())
    }
}

/// A public key plus the display metadata carried by a public keyfile.
#[derive(Clone, Debug)]
pub struct IdentityRecord {
    pub public_key: PublicKey,
    pub name: Vec<u8>,
    pub email: Vec<u8>,
}

/// A private key plus the display metadata carried by a private
/// keyfile.
pub struct PrivateIdentity {
    pub private_key: PrivateKey,
    pub name: Vec<u8>,
    pub email: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_core::OsRng;

    #[test]
    fn private_key_scalar_round_trips_through_biguint() {
        let mut rng = OsRng;
        let key = PrivateKey::generate(&mut rng);
        let rebuilt = PrivateKey::from_biguint(&key.to_biguint()).unwrap();
        assert_eq!(key.scalar().to_biguint(), rebuilt.scalar().to_biguint());
    }

    #[test]
    fn public_key_is_derived_consistently() {
        let mut rng = OsRng;
        let key = PrivateKey::generate(&mut rng);
        let a = key.public_key();
        let b = key.public_key();
        assert_eq!(a.xy(), b.xy());
    }

    #[test]
    fn from_biguint_rejects_zero_scalar() {
        assert!(PrivateKey::from_biguint(&BigUint::from(0u32)).is_err());
    }

    #[test]
    fn from_biguint_rejects_scalar_at_or_above_order() {
        assert!(PrivateKey::from_biguint(&order()).is_err());
        assert!(PrivateKey::from_biguint(&(order() + BigUint::from(1u32))).is_err());
    }
}
