//! Password → key derivation.

use sha2::{Digest, Sha256};

/// Byte length of a derived symmetric key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Fixed-size key buffer that holds exactly [`KEY_LEN`] bytes.
///
/// Lives only for the duration of one encode/decode call and is never
/// persisted. When this type is dropped, the memory is overwritten with
/// zeroes to minimise the window during which key material lives in RAM.
#[derive(Clone)]
pub struct SymmetricKey(Box<[u8; KEY_LEN]>);

impl SymmetricKey {
    /// Borrow the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl Drop for SymmetricKey {
    fn drop(&mut self) {
        // Zero the key material on drop.
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material — not even in debug builds.
        f.write_str("SymmetricKey([REDACTED])")
    }
}

/// Derive a [`SymmetricKey`] from a UTF-8 password.
///
/// The key is the SHA-256 digest of the password bytes. The derivation is
/// deliberately unsalted: identical passwords always yield identical keys,
/// which is a contract of the envelope format. Accepts any string, including
/// empty — rejecting blank passwords is the caller's job.
pub fn derive_key(password: &str) -> SymmetricKey {
    let digest = Sha256::digest(password.as_bytes());
    let mut buf = Box::new([0u8; KEY_LEN]);
    buf.copy_from_slice(&digest);
    SymmetricKey(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_deterministic() {
        let k1 = derive_key("correct horse battery staple");
        let k2 = derive_key("correct horse battery staple");
        assert_eq!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn different_passwords_differ() {
        let k1 = derive_key("alpha");
        let k2 = derive_key("beta");
        assert_ne!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn known_answer() {
        // SHA-256("s3cret")
        let expected: [u8; KEY_LEN] = [
            0x1e, 0xc1, 0xc2, 0x6b, 0x50, 0xd5, 0xd3, 0xc5, 0x8d, 0x95, 0x83, 0x18, 0x1a, 0xf8,
            0x07, 0x66, 0x55, 0xfe, 0x00, 0x75, 0x6b, 0xf7, 0x28, 0x59, 0x40, 0xba, 0x36, 0x70,
            0xf9, 0x9f, 0xcb, 0xa0,
        ];
        assert_eq!(derive_key("s3cret").as_bytes(), &expected);
    }

    #[test]
    fn empty_password_is_accepted() {
        // SHA-256 of the empty string, e3b0c442...
        let key = derive_key("");
        assert_eq!(key.as_bytes()[0], 0xe3);
        assert_eq!(key.as_bytes()[1], 0xb0);
    }

    #[test]
    fn key_redacted_in_debug() {
        let key = derive_key("hunter2");
        assert!(format!("{key:?}").contains("REDACTED"));
    }
}
