//! DER-encoded containers and their per-container Reed-Solomon framing.
//!
//! Each container has its own framing rule, because they are not the
//! same rule: messages get 8 parity symbols, public keyfiles get 30,
//! and private keyfiles get none at all.

use num_bigint::BigUint;

use super::der::{self, Value};
use super::error::{Error, Result};
use super::reed_solomon;
use super::signature::Signature;

const MESSAGE_PARITY: usize = 8;
const PUBLIC_KEY_PARITY: usize = 30;

/// `der`'s structural errors are all reported as [`Error::MalformedMessage`]
/// since that module has no notion of "this happens to be a keyfile".
/// Key-container callers reclassify them here.
fn as_malformed_key(err: Error) -> Error {
    match err {
        Error::MalformedMessage(reason) => Error::MalformedKey(reason),
        other => other,
    }
}

pub struct MessageEnvelope {
    pub ciphertext: Vec<u8>,
    pub ephemeral_x: BigUint,
    pub ephemeral_y: BigUint,
    pub signature: Signature,
}

impl MessageEnvelope {
    fn to_der(&self) -> Value {
        Value::Sequence(vec![
            Value::OctetString(self.ciphertext.clone()),
            Value::Sequence(vec![
                Value::Integer(self.ephemeral_x.clone()),
                Value::Integer(self.ephemeral_y.clone()),
            ]),
            Value::Sequence(vec![
                Value::Integer(self.signature.r.clone()),
                Value::Integer(self.signature.s.clone()),
            ]),
        ])
    }

    fn from_der(value: &Value) -> Result<Self> {
        let fields = value
            .as_sequence()
            .ok_or_else(|| Error::MalformedMessage("envelope is not a SEQUENCE".into()))?;
        let [message, key, sig] = fields else {
            return Err(Error::MalformedMessage("envelope has wrong field count".into()));
        };

        let ciphertext = message
            .as_octet_string()
            .ok_or_else(|| Error::MalformedMessage("message field is not an OCTET STRING".into()))?
            .to_vec();

        let key_fields = key
            .as_sequence()
            .ok_or_else(|| Error::MalformedMessage("key field is not a SEQUENCE".into()))?;
        let [kx, ky] = key_fields else {
            return Err(Error::MalformedMessage("key field has wrong arity".into()));
        };
        let ephemeral_x = kx
            .as_integer()
            .ok_or_else(|| Error::MalformedMessage("key.x is not an INTEGER".into()))?
            .clone();
        let ephemeral_y = ky
            .as_integer()
            .ok_or_else(|| Error::MalformedMessage("key.y is not an INTEGER".into()))?
            .clone();

        let sig_fields = sig
            .as_sequence()
            .ok_or_else(|| Error::MalformedMessage("signature field is not a SEQUENCE".into()))?;
        let [r, s] = sig_fields else {
            return Err(Error::MalformedMessage("signature field has wrong arity".into()));
        };
        let r = r
            .as_integer()
            .ok_or_else(|| Error::MalformedMessage("signature.r is not an INTEGER".into()))?
            .clone();
        let s = s
            .as_integer()
            .ok_or_else(|| Error::MalformedMessage("signature.s is not an INTEGER".into()))?
            .clone();

        Ok(Self {
            ciphertext,
            ephemeral_x,
            ephemeral_y,
            signature: Signature { r, s },
        })
    }

    /// DER-encode, then Reed-Solomon frame with parity 8.
    pub fn to_framed_bytes(&self) -> Vec<u8> {
        reed_solomon::encode(&self.to_der().encode(), MESSAGE_PARITY)
    }

    /// Reed-Solomon decode (parity 8), then DER-decode.
    pub fn from_framed_bytes(framed: &[u8]) -> Result<Self> {
        let der_bytes = reed_solomon::decode(framed, MESSAGE_PARITY)?;
        let value = der::decode_one(&der_bytes)?;
        Self::from_der(&value)
    }
}

pub struct PublicKeyfile {
    pub kx: BigUint,
    pub ky: BigUint,
    pub name: Vec<u8>,
    pub email: Vec<u8>,
}

impl PublicKeyfile {
    fn to_der(&self) -> Value {
        Value::Sequence(vec![
            Value::Integer(self.kx.clone()),
            Value::Integer(self.ky.clone()),
            Value::OctetString(self.name.clone()),
            Value::OctetString(self.email.clone()),
        ])
    }

    fn from_der(value: &Value) -> Result<Self> {
        let fields = value
            .as_sequence()
            .ok_or_else(|| Error::MalformedKey("public keyfile is not a SEQUENCE".into()))?;
        let [kx, ky, name, email] = fields else {
            return Err(Error::MalformedKey("public keyfile has wrong field count".into()));
        };
        Ok(Self {
            kx: kx
                .as_integer()
                .ok_or_else(|| Error::MalformedKey("kx is not an INTEGER".into()))?
                .clone(),
            ky: ky
                .as_integer()
                .ok_or_else(|| Error::MalformedKey("ky is not an INTEGER".into()))?
                .clone(),
            name: name
                .as_octet_string()
                .ok_or_else(|| Error::MalformedKey("name is not an OCTET STRING".into()))?
                .to_vec(),
            email: email
                .as_octet_string()
                .ok_or_else(|| Error::MalformedKey("email is not an OCTET STRING".into()))?
                .to_vec(),
        })
    }

    /// DER-encode, then Reed-Solomon frame with parity 30.
    pub fn to_framed_bytes(&self) -> Vec<u8> {
        reed_solomon::encode(&self.to_der().encode(), PUBLIC_KEY_PARITY)
    }

    /// Reed-Solomon decode (parity 30), then DER-decode.
    pub fn from_framed_bytes(framed: &[u8]) -> Result<Self> {
        let der_bytes = reed_solomon::decode(framed, PUBLIC_KEY_PARITY)
            .map_err(|_| Error::MalformedKey("public keyfile framing is corrupted".into()))?;
        let value = der::decode_one(&der_bytes).map_err(as_malformed_key)?;
        Self::from_der(&value)
    }
}

pub struct PrivateKeyfile {
    pub k: BigUint,
    pub name: Vec<u8>,
    pub email: Vec<u8>,
}

impl PrivateKeyfile {
    fn to_der(&self) -> Value {
        Value::Sequence(vec![
            Value::Integer(self.k.clone()),
            Value::OctetString(self.name.clone()),
            Value::OctetString(self.email.clone()),
        ])
    }

    fn from_der(value: &Value) -> Result<Self> {
        let fields = value
            .as_sequence()
            .ok_or_else(|| Error::MalformedKey("private keyfile is not a SEQUENCE".into()))?;
        let [k, name, email] = fields else {
            return Err(Error::MalformedKey("private keyfile has wrong field count".into()));
        };
        Ok(Self {
            k: k
                .as_integer()
                .ok_or_else(|| Error::MalformedKey("k is not an INTEGER".into()))?
                .clone(),
            name: name
                .as_octet_string()
                .ok_or_else(|| Error::MalformedKey("name is not an OCTET STRING".into()))?
                .to_vec(),
            email: email
                .as_octet_string()
                .ok_or_else(|| Error::MalformedKey("email is not an OCTET STRING".into()))?
                .to_vec(),
        })
    }

    /// DER-encode. No outer Reed-Solomon frame: private keyfiles are
    /// never transmitted lossily the way messages and public keys are.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_der().encode()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let value = der::decode_one(bytes).map_err(as_malformed_key)?;
        Self::from_der(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_envelope_round_trips_through_framing() {
        let envelope = MessageEnvelope {
            ciphertext: vec![1, 2, 3, 4, 5],
            ephemeral_x: BigUint::from(12345u32),
            ephemeral_y: BigUint::from(67890u32),
            signature: Signature {
                r: BigUint::from(111u32),
                s: BigUint::from(222u32),
            },
        };
        let framed = envelope.to_framed_bytes();
        let decoded = MessageEnvelope::from_framed_bytes(&framed).unwrap();
        assert_eq!(decoded.ciphertext, envelope.ciphertext);
        assert_eq!(decoded.ephemeral_x, envelope.ephemeral_x);
        assert_eq!(decoded.signature.s, envelope.signature.s);
    }

    #[test]
    fn public_keyfile_round_trips_through_framing() {
        let keyfile = PublicKeyfile {
            kx: BigUint::from(1u32) << 255,
            ky: BigUint::from(9u32),
            name: b"Alice".to_vec(),
            email: b"alice@example.com".to_vec(),
        };
        let framed = keyfile.to_framed_bytes();
        let decoded = PublicKeyfile::from_framed_bytes(&framed).unwrap();
        assert_eq!(decoded.kx, keyfile.kx);
        assert_eq!(decoded.name, keyfile.name);
        assert_eq!(decoded.email, keyfile.email);
    }

    #[test]
    fn private_keyfile_round_trips_without_framing() {
        let keyfile = PrivateKeyfile {
            k: BigUint::from(42u32),
            name: b"Bob".to_vec(),
            email: b"bob@example.com".to_vec(),
        };
        let bytes = keyfile.to_bytes();
        let decoded = PrivateKeyfile::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.k, keyfile.k);
        assert_eq!(decoded.name, keyfile.name);
    }

    #[test]
    fn corrupted_public_keyfile_within_bound_still_decodes() {
        let keyfile = PublicKeyfile {
            kx: BigUint::from(999999u32),
            ky: BigUint::from(888888u32),
            name: b"Carol".to_vec(),
            email: b"carol@example.com".to_vec(),
        };
        let mut framed = keyfile.to_framed_bytes();
        framed[0] ^= 0xFF;
        framed[5] ^= 0xFF;
        let decoded = PublicKeyfile::from_framed_bytes(&framed).unwrap();
        assert_eq!(decoded.kx, keyfile.kx);
    }
}
