pub mod core;

pub use core::{
    armor, dearmor, decrypt_and_verify, encode_private_keyfile, encode_public_keyfile,
    encrypt_and_sign, parse_private_keyfile, parse_public_keyfile, Error, IdentityRecord, Label,
    PrivateIdentity, PrivateKey, PublicKey, Result,
};
