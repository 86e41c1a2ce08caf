//! Multipart form extraction for the encrypt and decrypt endpoints.
//!
//! Both endpoints accept the same three-part form: `file` (the payload),
//! `method` (algorithm selector), and `key` (password). Everything here is
//! validated before the crypto core is ever invoked.

use axum::extract::Multipart;
use bytes::Bytes;
use common::ServiceError;

/// A fully extracted and validated upload form.
#[derive(Debug)]
pub struct CryptoForm {
    /// Algorithm selector string as submitted (`"aes"` / `"chacha20"`).
    pub method: String,
    /// Password; guaranteed non-blank.
    pub password: String,
    /// Sanitised client-supplied file name, for logging and download naming.
    pub file_name: String,
    /// Raw file payload.
    pub data: Bytes,
}

/// Drain a multipart stream into a [`CryptoForm`].
///
/// Unknown fields are ignored; duplicate fields keep the last value.
///
/// # Errors
///
/// Returns [`ServiceError::BadRequest`] if the body is not valid multipart,
/// the file part is missing, the method is missing, or the password is
/// missing or blank.
pub async fn read_form(mut multipart: Multipart) -> Result<CryptoForm, ServiceError> {
    let mut method = None;
    let mut password = None;
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServiceError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            "method" => method = Some(read_text(field).await?),
            "key" => password = Some(read_text(field).await?),
            "file" => {
                let file_name = sanitize_file_name(field.file_name().unwrap_or_default());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ServiceError::BadRequest(format!("failed to read upload: {e}")))?;
                file = Some((file_name, data));
            }
            _ => {}
        }
    }

    let (file_name, data) =
        file.ok_or_else(|| ServiceError::BadRequest("no file uploaded".into()))?;
    let method =
        method.ok_or_else(|| ServiceError::BadRequest("no encryption method selected".into()))?;
    let password =
        password.ok_or_else(|| ServiceError::BadRequest("password must not be empty".into()))?;
    if password.trim().is_empty() {
        return Err(ServiceError::BadRequest("password must not be empty".into()));
    }

    Ok(CryptoForm {
        method,
        password,
        file_name,
        data,
    })
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ServiceError> {
    field
        .text()
        .await
        .map_err(|e| ServiceError::BadRequest(format!("invalid multipart field: {e}")))
}

/// Reduce a client-supplied file name to its final path component.
///
/// Falls back to `upload.bin` for empty or purely structural names.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    if base.is_empty() || base == "." || base == ".." {
        "upload.bin".to_owned()
    } else {
        base.to_owned()
    }
}

/// Download name for an encrypted artifact: the upload name plus `.enc`.
pub fn encrypted_file_name(upload_name: &str) -> String {
    format!("{upload_name}.enc")
}

/// Download name for a decrypted artifact: the upload name with a trailing
/// `.enc` stripped, or `.dec` appended when there is nothing to strip.
pub fn decrypted_file_name(upload_name: &str) -> String {
    match upload_name.strip_suffix(".enc") {
        Some(stem) if !stem.is_empty() => stem.to_owned(),
        _ => format!("{upload_name}.dec"),
    }
}
