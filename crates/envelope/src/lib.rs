//! Password-based authenticated file encryption.
//!
//! This crate is intentionally free of HTTP and filesystem dependencies.
//! It provides two pure transforms over in-memory byte buffers:
//!
//! - [`encode`]: derive a key from a password, encrypt a plaintext under one
//!   of two algorithms, and bind IV + ciphertext with an HMAC-SHA-256 tag.
//! - [`decode`]: parse and validate an envelope, verify the tag in constant
//!   time, and recover the plaintext or a typed failure.
//!
//! # Envelope format
//!
//! ```text
//! +--------+----------------+----------+------------------+
//! | tag: 1 | hmac-sha256: 32 | iv: 16  | ciphertext: rest |
//! +--------+----------------+----------+------------------+
//! ```
//!
//! The leading tag byte identifies the algorithm (`0x01` = AES-256-CBC,
//! `0x02` = ChaCha20). The HMAC is computed over `iv ‖ ciphertext` with the
//! same derived key used for encryption.

pub mod algorithm;
pub mod codec;
pub mod error;
pub mod kdf;

pub use algorithm::Algorithm;
pub use codec::{decode, encode, HEADER_LEN, IV_LEN, TAG_LEN};
pub use error::EnvelopeError;
pub use kdf::{derive_key, SymmetricKey, KEY_LEN};
