//! ECIES-like key exchange: derives a shared point without authenticating
//! or committing to it any further than the caller does downstream.

use rand_core::CryptoRngCore;

use super::curve::{generator, Point, Scalar};
use super::keys::{PrivateKey, PublicKey};

/// Result of [`exchange`]: the ephemeral public point to hand to the
/// peer, and the shared secret point only the caller sees.
pub struct Exchanged {
    pub ephemeral_public: Point,
    pub shared_secret: Point,
}

/// Draw a fresh ephemeral scalar `u`, and derive `R = u·G` and
/// `S = u·peer_public`.
pub fn exchange(peer_public: &PublicKey, rng: &mut impl CryptoRngCore) -> Exchanged {
    let u = Scalar::random(rng);
    Exchanged {
        ephemeral_public: generator() * u,
        shared_secret: peer_public.point() * u,
    }
}

/// Recover the shared secret point from the peer's ephemeral public
/// point and our own private scalar: `S = k·R`.
pub fn recover(ephemeral_public: &Point, my_private: &PrivateKey) -> Point {
    *ephemeral_public * my_private.scalar()
}
