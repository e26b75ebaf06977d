//! Hybrid encrypt/decrypt: KEM + key derivation + OAEP + AES-256-CBC.

use aes::Aes256;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand_core::CryptoRngCore;
use secrecy::{ExposeSecret, SecretBox};

use super::curve::Point;
use super::error::{Error, Result};
use super::hash::sha3_512;
use super::kem;
use super::keys::{PrivateKey, PublicKey};
use super::oaep;

type Encryptor = cbc::Encryptor<Aes256>;
type Decryptor = cbc::Decryptor<Aes256>;

/// The derived AES key and IV, held behind `SecretBox` so both are
/// zeroized on drop instead of lingering in the caller's stack frame.
struct SymmetricMaterial {
    key: SecretBox<[u8; 32]>,
    iv: SecretBox<[u8; 16]>,
}

/// Derive AES key and IV from the shared secret point's x-coordinate.
///
/// Hashes the UTF-8 decimal-string representation of `S.x`, not its
/// canonical big-endian bytes — preserved for compatibility with the
/// reference implementation (see DESIGN.md, Open Question 2).
fn derive_key_material(shared_secret: &Point) -> SymmetricMaterial {
    let x = shared_secret.x();
    let digest = sha3_512(x.to_string().as_bytes());
    let mut key = [0u8; 32];
    let mut iv = [0u8; 16];
    key.copy_from_slice(&digest[0..32]);
    iv.copy_from_slice(&digest[32..48]);
    // digest[48..64] is deliberately unused.
    SymmetricMaterial {
        key: SecretBox::new(Box::new(key)),
        iv: SecretBox::new(Box::new(iv)),
    }
}

pub struct EncryptedPayload {
    pub ephemeral_public: Point,
    pub ciphertext: Vec<u8>,
}

/// Encrypt `plaintext` to `recipient`.
pub fn encrypt(
    recipient: &PublicKey,
    plaintext: &[u8],
    rng: &mut impl CryptoRngCore,
) -> EncryptedPayload {
    let exchanged = kem::exchange(recipient, rng);
    let material = derive_key_material(&exchanged.shared_secret);
    let padded = oaep::pad(plaintext, rng);

    let ciphertext = Encryptor::new(
        &(*material.key.expose_secret()).into(),
        &(*material.iv.expose_secret()).into(),
    )
    .encrypt_padded_vec_mut::<Pkcs7>(&padded);

    EncryptedPayload {
        ephemeral_public: exchanged.ephemeral_public,
        ciphertext,
    }
}

/// Decrypt `ciphertext` sent via `ephemeral_public`, using `recipient_private`.
///
/// Returns [`Error::DecryptionFailure`] on any AES/OAEP failure; never
/// panics on attacker-controlled input.
pub fn decrypt(
    recipient_private: &PrivateKey,
    ephemeral_public: &Point,
    ciphertext: &[u8],
) -> Result<Vec<u8>> {
    let shared_secret = kem::recover(ephemeral_public, recipient_private);
    let material = derive_key_material(&shared_secret);

    let mut buf = ciphertext.to_vec();
    let padded = Decryptor::new(
        &(*material.key.expose_secret()).into(),
        &(*material.iv.expose_secret()).into(),
    )
    .decrypt_padded_mut::<Pkcs7>(&mut buf)
    .map_err(|_| Error::DecryptionFailure)?;

    oaep::unpad(padded).ok_or(Error::DecryptionFailure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_core::OsRng;

    #[test]
    fn encrypt_decrypt_round_trips() {
        let mut rng = OsRng;
        let recipient_priv = PrivateKey::generate(&mut rng);
        let recipient_pub = recipient_priv.public_key();

        for msg in [&b""[..], b"a", b"exactly16bytes!!", &[7u8; 15], &[9u8; 1000]] {
            let payload = encrypt(&recipient_pub, msg, &mut rng);
            let plaintext =
                decrypt(&recipient_priv, &payload.ephemeral_public, &payload.ciphertext).unwrap();
            assert_eq!(plaintext, msg);
        }
    }

    #[test]
    fn decrypting_with_wrong_key_fails_or_garbles() {
        let mut rng = OsRng;
        let recipient_priv = PrivateKey::generate(&mut rng);
        let recipient_pub = recipient_priv.public_key();
        let other_priv = PrivateKey::generate(&mut rng);

        let payload = encrypt(&recipient_pub, b"secret message", &mut rng);
        let result = decrypt(&other_priv, &payload.ephemeral_public, &payload.ciphertext);
        assert!(result.is_err() || result.unwrap() != b"secret message");
    }

    #[test]
    fn tampered_ciphertext_does_not_decrypt_to_original() {
        let mut rng = OsRng;
        let recipient_priv = PrivateKey::generate(&mut rng);
        let recipient_pub = recipient_priv.public_key();

        let mut payload = encrypt(&recipient_pub, b"tamper me", &mut rng);
        payload.ciphertext[0] ^= 0xFF;
        let result = decrypt(&recipient_priv, &payload.ephemeral_public, &payload.ciphertext);
        assert!(result.is_err() || result.unwrap() != b"tamper me");
    }
}
