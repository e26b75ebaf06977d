use std::fmt;

/// Coarse error surface of the core.
///
/// The core never raises on a cryptographic *mismatch* (wrong key, bad
/// signature) — those are reported through return values instead. It only
/// raises on structurally malformed input and on unrecoverable primitive
/// failures.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// A keyfile's armor, Reed-Solomon framing, or DER structure is
    /// invalid, or it decodes to an out-of-range integer or off-curve
    /// point.
    MalformedKey(String),
    /// A message blob's armor, Reed-Solomon framing, or DER structure is
    /// invalid.
    MalformedMessage(String),
    /// AES/OAEP processing failed (wrong key, corrupted ciphertext).
    DecryptionFailure,
    /// The signature does not match the recovered plaintext.
    VerificationFailure,
    /// The system RNG could not produce bytes.
    RngFailure,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedKey(reason) => write!(f, "malformed key: {reason}"),
            Self::MalformedMessage(reason) => write!(f, "malformed message: {reason}"),
            Self::DecryptionFailure => write!(
                f,
                "could not decrypt message; wrong key, or the data is corrupted"
            ),
            Self::VerificationFailure => write!(f, "signature does not match the message"),
            Self::RngFailure => write!(f, "system random number generator failed"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
