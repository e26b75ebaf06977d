//! Group arithmetic over the curve used for both the KEM and the
//! signature scheme.
//!
//! This implementation fixes secp256k1 (via `k256`) as the concrete
//! curve. Everything above this module talks in terms of [`Point`] and
//! [`Scalar`] only, so swapping the underlying curve crate later is a
//! change confined to this file.

use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::rand_core::CryptoRngCore;
use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::elliptic_curve::Field;
use k256::{AffinePoint, EncodedPoint, ProjectivePoint, Scalar as K256Scalar, U256};
use num_bigint::BigUint;

use super::error::{Error, Result};

/// A scalar modulo the curve's group order `n`.
#[derive(Clone, Copy, Debug)]
pub struct Scalar(pub(crate) K256Scalar);

impl Scalar {
    /// Draw a uniformly random non-zero scalar.
    pub fn random(rng: &mut impl CryptoRngCore) -> Self {
        Self(K256Scalar::random(rng))
    }

    /// Reduce an arbitrary-length big-endian integer modulo the group
    /// order. Used for both private-key scalars and the ECDSA message
    /// integer `z`, neither of which is pre-reduced by its caller.
    pub fn from_biguint_mod_order(value: &BigUint) -> Self {
        let bytes = value.to_bytes_be();
        // `Reduce` wants a fixed 32-byte (or wider, via `U256`) input;
        // left-pad/truncate into a 32-byte window taken from the least
        // significant end, then let `reduce` fold it modulo `n`.
        let mut buf = [0u8; 32];
        let take = bytes.len().min(32);
        buf[32 - take..].copy_from_slice(&bytes[bytes.len() - take..]);
        let wide = U256::from_be_slice(&buf);
        Self(<K256Scalar as Reduce<U256>>::reduce(wide))
    }

    pub fn to_biguint(self) -> BigUint {
        BigUint::from_bytes_be(&self.0.to_bytes())
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero().into()
    }

    pub fn invert(self) -> Option<Self> {
        Option::from(self.0.invert()).map(Self)
    }
}

impl std::ops::Add for Scalar {
    type Output = Scalar;
    fn add(self, rhs: Scalar) -> Scalar {
        Scalar(self.0 + rhs.0)
    }
}

impl std::ops::Mul for Scalar {
    type Output = Scalar;
    fn mul(self, rhs: Scalar) -> Scalar {
        Scalar(self.0 * rhs.0)
    }
}

/// A point on the curve, including (implicitly) the point at infinity.
#[derive(Clone, Copy, Debug)]
pub struct Point(pub(crate) ProjectivePoint);

impl Point {
    pub fn identity() -> Self {
        Self(ProjectivePoint::IDENTITY)
    }

    pub fn is_identity(&self) -> bool {
        bool::from(k256::elliptic_curve::group::Group::is_identity(&self.0))
    }

    /// Build a point from affine coordinates, rejecting anything not on
    /// the curve (including the coordinates simply being garbage).
    pub fn from_affine_coordinates(x: &BigUint, y: &BigUint) -> Result<Self> {
        let x_bytes = to_32_bytes(x).ok_or_else(|| Error::MalformedKey("x coordinate too large".into()))?;
        let y_bytes = to_32_bytes(y).ok_or_else(|| Error::MalformedKey("y coordinate too large".into()))?;

        let mut uncompressed = [0u8; 65];
        uncompressed[0] = 0x04;
        uncompressed[1..33].copy_from_slice(&x_bytes);
        uncompressed[33..65].copy_from_slice(&y_bytes);

        let encoded = EncodedPoint::from_bytes(uncompressed)
            .map_err(|_| Error::MalformedKey("invalid point encoding".into()))?;
        let affine = Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded))
            .ok_or_else(|| Error::MalformedKey("point is not on the curve".into()))?;
        Ok(Self(ProjectivePoint::from(affine)))
    }

    /// `(x, y)` affine coordinates. Panics if called on the identity,
    /// which callers must never try to serialize.
    pub fn xy(&self) -> (BigUint, BigUint) {
        let affine = self.0.to_affine();
        let encoded = affine.to_encoded_point(false);
        let x = BigUint::from_bytes_be(encoded.x().expect("non-identity point has x"));
        let y = BigUint::from_bytes_be(encoded.y().expect("non-identity point has y"));
        (x, y)
    }

    pub fn x(&self) -> BigUint {
        self.xy().0
    }
}

impl std::ops::Mul<Scalar> for Point {
    type Output = Point;
    fn mul(self, rhs: Scalar) -> Point {
        Point(self.0 * rhs.0)
    }
}

impl std::ops::Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point(self.0 + rhs.0)
    }
}

/// The curve's fixed base point.
pub fn generator() -> Point {
    Point(ProjectivePoint::GENERATOR)
}

/// The order `n` of the generator's subgroup.
pub fn order() -> BigUint {
    // secp256k1 group order, a compile-time constant of the curve.
    BigUint::parse_bytes(
        b"FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141",
        16,
    )
    .expect("hardcoded curve order parses")
}

fn to_32_bytes(value: &BigUint) -> Option<[u8; 32]> {
    let bytes = value.to_bytes_be();
    if bytes.len() > 32 {
        return None;
    }
    let mut buf = [0u8; 32];
    buf[32 - bytes.len()..].copy_from_slice(&bytes);
    Some(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_core::OsRng;

    #[test]
    fn scalar_mul_generator_round_trips_through_coordinates() {
        let mut rng = OsRng;
        let k = Scalar::random(&mut rng);
        let p = generator() * k;
        let (x, y) = p.xy();
        let rebuilt = Point::from_affine_coordinates(&x, &y).unwrap();
        assert_eq!(rebuilt.x(), p.x());
    }

    #[test]
    fn garbage_coordinates_are_rejected() {
        let x = BigUint::from(1u32);
        let y = BigUint::from(2u32);
        assert!(Point::from_affine_coordinates(&x, &y).is_err());
    }

    #[test]
    fn point_addition_is_commutative() {
        let mut rng = OsRng;
        let a = generator() * Scalar::random(&mut rng);
        let b = generator() * Scalar::random(&mut rng);
        assert_eq!((a + b).x(), (b + a).x());
    }
}
