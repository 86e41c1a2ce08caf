//! Envelope encode/decode: authenticated encryption under a password.
//!
//! # Wire layout
//!
//! | offset | length | field                                 |
//! |--------|--------|---------------------------------------|
//! | 0      | 1      | algorithm tag byte                    |
//! | 1      | 32     | HMAC-SHA-256 over `iv ‖ ciphertext`   |
//! | 33     | 16     | IV / nonce, fresh per envelope        |
//! | 49     | rest   | ciphertext                            |
//!
//! All fields are raw bytes. The same derived key is used for both the
//! cipher and the HMAC; the tag is always verified before any decryption is
//! attempted. For ChaCha20 the 16-byte IV field is consumed as a 32-bit
//! little-endian initial block counter (bytes 0..4) followed by a 96-bit
//! nonce (bytes 4..16).

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use chacha20::cipher::{StreamCipher, StreamCipherSeek};
use chacha20::ChaCha20;
use hmac::{Hmac, Mac};
use rand::{rngs::OsRng, RngCore};
use sha2::Sha256;

use crate::algorithm::Algorithm;
use crate::error::EnvelopeError;
use crate::kdf::{derive_key, SymmetricKey};

/// Byte length of the authentication tag (HMAC-SHA-256 output).
pub const TAG_LEN: usize = 32;

/// Byte length of the IV / nonce field.
pub const IV_LEN: usize = 16;

/// Byte length of the fixed envelope header: tag byte + HMAC + IV.
pub const HEADER_LEN: usize = 1 + TAG_LEN + IV_LEN;

/// AES block size; CBC ciphertext length is always a multiple of this.
const AES_BLOCK_LEN: usize = 16;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;
type HmacSha256 = Hmac<Sha256>;

/// Encrypt `plaintext` under `password`, producing a self-describing envelope.
///
/// A fresh IV is drawn from the OS CSPRNG on every call, so encrypting the
/// same plaintext under the same password twice yields different envelopes.
/// Infallible: the closed [`Algorithm`] enum makes an unsupported cipher
/// unrepresentable, and neither cipher can fail on encrypt.
pub fn encode(plaintext: &[u8], algorithm: Algorithm, password: &str) -> Vec<u8> {
    let key = derive_key(password);

    let mut iv = [0u8; IV_LEN];
    OsRng.fill_bytes(&mut iv);

    let ciphertext = encrypt_raw(plaintext, algorithm, &key, &iv);
    let tag = authentication_tag(&key, &iv, &ciphertext);

    let mut envelope = Vec::with_capacity(HEADER_LEN + ciphertext.len());
    envelope.push(algorithm.tag_byte());
    envelope.extend_from_slice(&tag);
    envelope.extend_from_slice(&iv);
    envelope.extend_from_slice(&ciphertext);
    envelope
}

/// Decrypt an envelope back to its plaintext.
///
/// Validation order, each failure stopping immediately:
///
/// 1. length gate (envelopes of [`HEADER_LEN`] bytes or fewer are malformed),
/// 2. tag byte must name a known algorithm,
/// 3. that algorithm must equal `expected`,
/// 4. the HMAC over `iv ‖ ciphertext` must verify (fixed-time comparison),
/// 5. only then is the ciphertext decrypted.
///
/// # Errors
///
/// [`EnvelopeError::Malformed`] for short or unrecognized buffers,
/// [`EnvelopeError::AlgorithmMismatch`] when the caller asserted the wrong
/// algorithm, [`EnvelopeError::AuthenticationFailed`] for a wrong password or
/// tampered data, and [`EnvelopeError::CorruptData`] for ciphertext that is
/// not decryptable at all.
pub fn decode(
    envelope: &[u8],
    expected: Algorithm,
    password: &str,
) -> Result<Vec<u8>, EnvelopeError> {
    if envelope.len() <= HEADER_LEN {
        return Err(EnvelopeError::Malformed("too small or corrupt"));
    }

    let actual = Algorithm::from_tag_byte(envelope[0])
        .ok_or(EnvelopeError::Malformed("not produced by this encryptor"))?;
    if actual != expected {
        return Err(EnvelopeError::AlgorithmMismatch { actual, expected });
    }

    let stored_tag = &envelope[1..1 + TAG_LEN];
    let mut iv = [0u8; IV_LEN];
    iv.copy_from_slice(&envelope[1 + TAG_LEN..HEADER_LEN]);
    let ciphertext = &envelope[HEADER_LEN..];

    let key = derive_key(password);
    if !verify_tag(&key, &iv, ciphertext, stored_tag) {
        return Err(EnvelopeError::AuthenticationFailed);
    }

    decrypt_raw(ciphertext, actual, &key, &iv)
}

fn encrypt_raw(
    plaintext: &[u8],
    algorithm: Algorithm,
    key: &SymmetricKey,
    iv: &[u8; IV_LEN],
) -> Vec<u8> {
    match algorithm {
        Algorithm::Aes256Cbc => Aes256CbcEnc::new(key.as_bytes().into(), iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        Algorithm::ChaCha20 => {
            let mut buf = plaintext.to_vec();
            chacha20_cipher(key, iv).apply_keystream(&mut buf);
            buf
        }
    }
}

fn decrypt_raw(
    ciphertext: &[u8],
    algorithm: Algorithm,
    key: &SymmetricKey,
    iv: &[u8; IV_LEN],
) -> Result<Vec<u8>, EnvelopeError> {
    match algorithm {
        Algorithm::Aes256Cbc => {
            if ciphertext.len() % AES_BLOCK_LEN != 0 {
                return Err(EnvelopeError::CorruptData);
            }
            Aes256CbcDec::new(key.as_bytes().into(), iv.into())
                .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
                .map_err(|_| EnvelopeError::AuthenticationFailed)
        }
        Algorithm::ChaCha20 => {
            let mut buf = ciphertext.to_vec();
            chacha20_cipher(key, iv).apply_keystream(&mut buf);
            Ok(buf)
        }
    }
}

/// Build a ChaCha20 instance from the envelope's 16-byte IV field.
///
/// Bytes 0..4 are a little-endian initial block counter, bytes 4..16 the
/// 96-bit nonce.
fn chacha20_cipher(key: &SymmetricKey, iv: &[u8; IV_LEN]) -> ChaCha20 {
    let counter = u32::from_le_bytes([iv[0], iv[1], iv[2], iv[3]]);
    let mut nonce = [0u8; 12];
    nonce.copy_from_slice(&iv[4..]);

    let mut cipher = ChaCha20::new(key.as_bytes().into(), (&nonce).into());
    cipher.seek(u64::from(counter) * 64);
    cipher
}

fn keyed_mac(key: &SymmetricKey) -> HmacSha256 {
    // HMAC accepts keys of any length; a 32-byte key can never be rejected.
    HmacSha256::new_from_slice(key.as_bytes()).expect("HMAC key of any length is valid")
}

fn authentication_tag(key: &SymmetricKey, iv: &[u8; IV_LEN], ciphertext: &[u8]) -> [u8; TAG_LEN] {
    let mut mac = keyed_mac(key);
    mac.update(iv);
    mac.update(ciphertext);
    mac.finalize().into_bytes().into()
}

fn verify_tag(key: &SymmetricKey, iv: &[u8; IV_LEN], ciphertext: &[u8], stored: &[u8]) -> bool {
    let mut mac = keyed_mac(key);
    mac.update(iv);
    mac.update(ciphertext);
    // Fixed-time comparison; fails closed on length mismatch.
    mac.verify_slice(stored).is_ok()
}
