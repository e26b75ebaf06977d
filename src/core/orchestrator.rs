//! Top-level orchestration: `encrypt_and_sign` and `decrypt_and_verify`
//! are the sole public entry points into the cryptographic core.

use rand_core::CryptoRngCore;

use super::container::{MessageEnvelope, PrivateKeyfile, PublicKeyfile};
use super::curve::Point;
use super::error::{Error, Result};
use super::hybrid;
use super::keys::{IdentityRecord, PrivateIdentity, PublicKey};
use super::signature;

/// Parse a (framed, DER-encoded) public keyfile into an identity.
pub fn parse_public_keyfile(bytes: &[u8]) -> Result<IdentityRecord> {
    let keyfile = PublicKeyfile::from_framed_bytes(bytes)?;
    let point = Point::from_affine_coordinates(&keyfile.kx, &keyfile.ky)?;
    Ok(IdentityRecord {
        public_key: PublicKey::from_point(point),
        name: keyfile.name,
        email: keyfile.email,
    })
}

/// Parse a (DER-encoded, unframed) private keyfile into an identity.
pub fn parse_private_keyfile(bytes: &[u8]) -> Result<PrivateIdentity> {
    let keyfile = PrivateKeyfile::from_bytes(bytes)?;
    Ok(PrivateIdentity {
        private_key: super::keys::PrivateKey::from_biguint(&keyfile.k)?,
        name: keyfile.name,
        email: keyfile.email,
    })
}

/// Serialize an identity back into its framed public keyfile bytes, for
/// key generation and export.
pub fn encode_public_keyfile(identity: &IdentityRecord) -> Vec<u8> {
    let (kx, ky) = identity.public_key.xy();
    PublicKeyfile {
        kx,
        ky,
        name: identity.name.clone(),
        email: identity.email.clone(),
    }
    .to_framed_bytes()
}

/// Serialize a private identity back into its (unframed) private
/// keyfile bytes, for key generation and export.
pub fn encode_private_keyfile(identity: &PrivateIdentity) -> Vec<u8> {
    PrivateKeyfile {
        k: identity.private_key.to_biguint(),
        name: identity.name.clone(),
        email: identity.email.clone(),
    }
    .to_bytes()
}

/// Encrypt `plaintext` to the recipient and sign it as the sender,
/// returning the framed, DER-encoded message envelope.
///
/// # Errors
///
/// Returns [`Error::MalformedKey`] if either keyfile fails to parse.
/// Never raises on a cryptographic mismatch — there is none to have at
/// this stage, since both keys are locally owned.
pub fn encrypt_and_sign(
    plaintext: &[u8],
    recipient_public_keyfile: &[u8],
    sender_private_keyfile: &[u8],
    rng: &mut impl CryptoRngCore,
) -> Result<Vec<u8>> {
    let recipient = parse_public_keyfile(recipient_public_keyfile)?;
    let sender = parse_private_keyfile(sender_private_keyfile)?;

    let payload = hybrid::encrypt(&recipient.public_key, plaintext, rng);
    let sig = signature::sign(&sender.private_key, plaintext, rng);
    let (ephemeral_x, ephemeral_y) = payload.ephemeral_public.xy();

    let envelope = MessageEnvelope {
        ciphertext: payload.ciphertext,
        ephemeral_x,
        ephemeral_y,
        signature: sig,
    };
    Ok(envelope.to_framed_bytes())
}

/// Decrypt `blob` and verify its signature came from the given sender.
///
/// Returns `(None, false)` if the blob is well-formed but fails to
/// decrypt (wrong key, corrupted ciphertext); returns `(Some(pt),
/// false)` if decryption succeeds but the signature does not match.
/// `verified` is never `true` unless the plaintext is `Some`.
///
/// # Errors
///
/// Returns [`Error::MalformedKey`] if either keyfile fails to parse, or
/// [`Error::MalformedMessage`] if `blob` itself is structurally
/// invalid (bad armor framing, corrupted beyond Reed-Solomon's
/// correction bound, or invalid DER).
pub fn decrypt_and_verify(
    blob: &[u8],
    sender_public_keyfile: &[u8],
    recipient_private_keyfile: &[u8],
) -> Result<(Option<Vec<u8>>, bool)> {
    let sender = parse_public_keyfile(sender_public_keyfile)?;
    let recipient = parse_private_keyfile(recipient_private_keyfile)?;

    let envelope = MessageEnvelope::from_framed_bytes(blob)?;
    let ephemeral_public =
        Point::from_affine_coordinates(&envelope.ephemeral_x, &envelope.ephemeral_y)
            .map_err(|_| Error::MalformedMessage("ephemeral point is not on the curve".into()))?;

    let plaintext =
        hybrid::decrypt(&recipient.private_key, &ephemeral_public, &envelope.ciphertext).ok();

    let verified = match &plaintext {
        Some(pt) => signature::verify(&sender.public_key, pt, &envelope.signature),
        None => false,
    };

    Ok((plaintext, verified))
}
