//! Common error types shared across crates.

use thiserror::Error;

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::BadRequest`] → 400
/// - [`ServiceError::DecryptionFailure`] → 500
/// - [`ServiceError::Internal`] → 500
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request is caller-correctable — a missing form field, an unknown
    /// algorithm selector, a wrong password, or a file this service did not
    /// produce.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The uploaded file passed validation but its ciphertext could not be
    /// decrypted — incomplete or corrupt.
    #[error("decryption failure: {0}")]
    DecryptionFailure(String),

    /// An unexpected internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::DecryptionFailure(_) => 500,
            ServiceError::Internal(_) => 500,
        }
    }

    /// Short machine-readable code used in JSON error bodies.
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::BadRequest(_) => "bad_request",
            ServiceError::DecryptionFailure(_) => "decryption_failure",
            ServiceError::Internal(_) => "internal_error",
        }
    }

    /// The caller-safe message without the variant prefix, for JSON bodies.
    pub fn public_message(&self) -> &str {
        match self {
            ServiceError::BadRequest(m)
            | ServiceError::DecryptionFailure(m)
            | ServiceError::Internal(m) => m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_codes() {
        assert_eq!(ServiceError::BadRequest("x".into()).http_status(), 400);
        assert_eq!(
            ServiceError::DecryptionFailure("x".into()).http_status(),
            500
        );
        assert_eq!(ServiceError::Internal("x".into()).http_status(), 500);
    }

    #[test]
    fn error_codes() {
        assert_eq!(
            ServiceError::BadRequest("x".into()).error_code(),
            "bad_request"
        );
        assert_eq!(
            ServiceError::DecryptionFailure("x".into()).error_code(),
            "decryption_failure"
        );
        assert_eq!(
            ServiceError::Internal("x".into()).error_code(),
            "internal_error"
        );
    }

    #[test]
    fn public_message_has_no_prefix() {
        let e = ServiceError::BadRequest("wrong password".into());
        assert_eq!(e.public_message(), "wrong password");
    }

    #[test]
    fn display_includes_message() {
        let e = ServiceError::BadRequest("password must not be empty".into());
        assert!(e.to_string().contains("password must not be empty"));
    }
}
