//! Typed failures produced by the envelope codec.

use thiserror::Error;

use crate::algorithm::Algorithm;

/// Errors produced by envelope encoding and decoding.
///
/// Every variant is a deterministic pure-function failure: retrying with the
/// same inputs reproduces the same result. The messages are safe to show to
/// callers and distinguish "wrong password" from "wrong algorithm" from
/// "corrupt data" without exposing cipher internals.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    /// The algorithm selector string is outside the supported set.
    #[error("unknown encryption method: {0}")]
    InvalidAlgorithm(String),

    /// The buffer is too short or its tag byte is unrecognized — truncated,
    /// damaged, or not produced by this encryptor.
    #[error("invalid file: {0}")]
    Malformed(&'static str),

    /// The envelope's embedded algorithm differs from the one the caller
    /// asserted.
    #[error("file was encrypted with {actual}, but {expected} was selected")]
    AlgorithmMismatch {
        /// Algorithm recorded in the envelope tag byte.
        actual: Algorithm,
        /// Algorithm the caller asked to decrypt with.
        expected: Algorithm,
    },

    /// Tag verification failed: wrong password or tampered data.
    #[error("wrong password or tampered data")]
    AuthenticationFailed,

    /// The ciphertext itself is unusable (e.g. not a whole number of cipher
    /// blocks). Unreachable when tag verification runs first, since a valid
    /// tag implies an intact ciphertext; kept as a defensive classification.
    #[error("file is incomplete or corrupt")]
    CorruptData,
}
