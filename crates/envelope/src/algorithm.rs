//! The closed set of supported ciphers and their envelope tag bytes.

use std::fmt;

use crate::error::EnvelopeError;

/// Symmetric cipher used for the payload of an envelope.
///
/// The set is closed: the first byte of every envelope must map to exactly
/// one variant, and both [`crate::encode`] and [`crate::decode`] match on it
/// exhaustively. Adding an algorithm means adding a variant and a tag byte
/// here, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// AES-256 in CBC mode with PKCS#7 padding.
    Aes256Cbc,
    /// ChaCha20 stream cipher (raw keystream, no Poly1305).
    ChaCha20,
}

impl Algorithm {
    /// The byte stored at offset 0 of every envelope.
    pub const fn tag_byte(self) -> u8 {
        match self {
            Algorithm::Aes256Cbc => 0x01,
            Algorithm::ChaCha20 => 0x02,
        }
    }

    /// Map an envelope tag byte back to its algorithm.
    ///
    /// Returns `None` for any byte outside the closed set, which marks the
    /// envelope as malformed.
    pub fn from_tag_byte(byte: u8) -> Option<Self> {
        match byte {
            0x01 => Some(Algorithm::Aes256Cbc),
            0x02 => Some(Algorithm::ChaCha20),
            _ => None,
        }
    }

    /// Parse an untrusted selector string (as submitted by the upload form).
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::InvalidAlgorithm`] for any selector outside
    /// `"aes"` / `"chacha20"`, before any cryptographic work is attempted.
    pub fn from_selector(selector: &str) -> Result<Self, EnvelopeError> {
        match selector {
            "aes" => Ok(Algorithm::Aes256Cbc),
            "chacha20" => Ok(Algorithm::ChaCha20),
            other => Err(EnvelopeError::InvalidAlgorithm(other.to_owned())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Aes256Cbc => f.write_str("AES-256-CBC"),
            Algorithm::ChaCha20 => f.write_str("ChaCha20"),
        }
    }
}
