pub mod cli;
pub mod ui;

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use rand_core::OsRng;

use cli::Args;
use ui::color::Color;

const PUBLIC_KEYS_DIR: &str = "public_keys";
const PRIVATE_KEY_PATH: &str = "private_key/private.asc";

fn public_keyfile_path(name: &str) -> PathBuf {
    Path::new(PUBLIC_KEYS_DIR).join(format!("{name}.asc"))
}

fn read_input(args: &Args) -> io::Result<Vec<u8>> {
    match &args.input {
        Some(path) => fs::read(path),
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

fn write_output(args: &Args, bytes: &[u8]) -> io::Result<()> {
    match &args.output {
        Some(path) => fs::write(path, bytes),
        None => io::stdout().write_all(bytes),
    }
}

fn report(err: impl std::fmt::Display) -> i32 {
    eprintln!("{}", Color::error(&err.to_string()));
    1
}

pub fn genkey(args: &Args) -> Result<(), i32> {
    let Some(owner) = &args.owner else {
        return Err(report("genkey requires --owner <name>"));
    };
    let Some(email) = &args.email else {
        return Err(report("genkey requires --email <address>"));
    };

    let mut rng = OsRng;
    let private_key = fincrypt::PrivateKey::generate(&mut rng);
    let public_key = private_key.public_key();

    let public_identity = fincrypt::IdentityRecord {
        public_key,
        name: owner.as_bytes().to_vec(),
        email: email.as_bytes().to_vec(),
    };
    let private_identity = fincrypt::PrivateIdentity {
        private_key,
        name: owner.as_bytes().to_vec(),
        email: email.as_bytes().to_vec(),
    };

    let public_bytes = fincrypt::encode_public_keyfile(&public_identity);
    let private_bytes = fincrypt::encode_private_keyfile(&private_identity);

    let public_armored = fincrypt::armor(&public_bytes, fincrypt::Label::PublicKey);
    let private_armored = fincrypt::armor(&private_bytes, fincrypt::Label::PrivateKey);

    fs::create_dir_all(PUBLIC_KEYS_DIR).map_err(report)?;
    if let Some(parent) = Path::new(PRIVATE_KEY_PATH).parent() {
        fs::create_dir_all(parent).map_err(report)?;
    }
    fs::write(public_keyfile_path(owner), public_armored).map_err(report)?;
    fs::write(PRIVATE_KEY_PATH, private_armored).map_err(report)?;

    println!("Generated keypair for {owner} <{email}>.");
    Ok(())
}

fn load_armored(path: impl AsRef<Path>, expected: fincrypt::Label) -> Result<Vec<u8>, i32> {
    let text = fs::read_to_string(path).map_err(report)?;
    let (label, bytes) = fincrypt::dearmor(&text).map_err(report)?;
    if label != expected {
        return Err(report("keyfile has the wrong armor label"));
    }
    Ok(bytes)
}

pub fn encrypt(args: &Args) -> Result<(), i32> {
    let Some(recipient) = &args.recipient else {
        return Err(report("encrypt requires --recipient <name>"));
    };

    let recipient_public = load_armored(public_keyfile_path(recipient), fincrypt::Label::PublicKey)?;
    let sender_private = load_armored(PRIVATE_KEY_PATH, fincrypt::Label::PrivateKey)?;
    let plaintext = read_input(args).map_err(report)?;

    let mut rng = OsRng;
    let blob = fincrypt::encrypt_and_sign(&plaintext, &recipient_public, &sender_private, &mut rng)
        .map_err(report)?;

    let output = if args.armor {
        fincrypt::armor(&blob, fincrypt::Label::Message).into_bytes()
    } else {
        blob
    };
    write_output(args, &output).map_err(report)?;
    Ok(())
}

pub fn decrypt(args: &Args) -> Result<(), i32> {
    let Some(sender) = &args.sender else {
        return Err(report("decrypt requires --sender <name>"));
    };

    let sender_public = load_armored(public_keyfile_path(sender), fincrypt::Label::PublicKey)?;
    let recipient_private = load_armored(PRIVATE_KEY_PATH, fincrypt::Label::PrivateKey)?;
    let input = read_input(args).map_err(report)?;

    let blob = match std::str::from_utf8(&input) {
        Ok(text) if text.trim_start().starts_with("-----") => {
            fincrypt::dearmor(text).map_err(report)?.1
        }
        _ => input,
    };

    let (plaintext, verified) =
        fincrypt::decrypt_and_verify(&blob, &sender_public, &recipient_private).map_err(report)?;

    let Some(plaintext) = plaintext else {
        return Err(report("could not decrypt message"));
    };
    if !verified {
        eprintln!(
            "{}",
            Color::warning("warning: signature does not verify against sender's public key")
        );
    }
    write_output(args, &plaintext).map_err(report)?;
    Ok(())
}

pub fn list_keys() -> Result<(), i32> {
    let entries = match fs::read_dir(PUBLIC_KEYS_DIR) {
        Ok(entries) => entries,
        Err(_) => {
            println!("No public keys found in {PUBLIC_KEYS_DIR}/.");
            return Ok(());
        }
    };

    for entry in entries {
        let entry = entry.map_err(report)?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("asc") {
            continue;
        }
        let text = fs::read_to_string(&path).map_err(report)?;
        let Ok((fincrypt::Label::PublicKey, bytes)) = fincrypt::dearmor(&text) else {
            continue;
        };
        let Ok(identity) = fincrypt::parse_public_keyfile(&bytes) else {
            continue;
        };
        println!(
            "{}\t{}\t<{}>\t{}",
            path.file_name().unwrap_or_default().to_string_lossy(),
            String::from_utf8_lossy(&identity.name),
            String::from_utf8_lossy(&identity.email),
            fingerprint(&text),
        );
    }
    Ok(())
}

/// A colon-hex SHA3-512 fingerprint of the armored key text, truncated
/// to 32 bytes. No randomart board; that visualization is out of scope.
fn fingerprint(armored_text: &str) -> String {
    let digest = sha3_512_hex(armored_text.as_bytes());
    digest[..64]
        .as_bytes()
        .chunks(2)
        .map(|pair| std::str::from_utf8(pair).unwrap())
        .collect::<Vec<_>>()
        .join(":")
}

fn sha3_512_hex(data: &[u8]) -> String {
    use sha3::{Digest, Sha3_512};
    let digest = Sha3_512::digest(data);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}
