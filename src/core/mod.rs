//! The cryptographic core: hybrid ECIES/AES-CBC encryption, ECDSA
//! signing, and the structured, Reed-Solomon-framed containers that
//! carry them. Nothing outside this module touches the filesystem or
//! knows about CLI concerns; [`encrypt_and_sign`] and
//! [`decrypt_and_verify`] are its only intended entry points.

mod armor;
mod container;
mod curve;
mod der;
mod error;
mod hash;
mod hybrid;
mod kem;
mod keys;
mod oaep;
mod orchestrator;
mod reed_solomon;
mod signature;

pub use armor::{armor, dearmor, Label};
pub use error::{Error, Result};
pub use keys::{IdentityRecord, PrivateIdentity, PrivateKey, PublicKey};
pub use orchestrator::{
    decrypt_and_verify, encode_private_keyfile, encode_public_keyfile, encrypt_and_sign,
    parse_private_keyfile, parse_public_keyfile,
};
