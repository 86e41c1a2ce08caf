//! Axum request handlers for all service endpoints.

use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use common::protocol::{ErrorResponse, HealthResponse};
use common::ServiceError;
use envelope::{Algorithm, EnvelopeError};
use tracing::{info, warn};

use super::state::AppState;
use crate::upload;

/// Minimal upload page served at `GET /`.
const INDEX_HTML: &str = r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>sealbox</title></head>
<body>
  <h1>sealbox</h1>
  <form action="/encrypt" method="post" enctype="multipart/form-data">
    <h2>Encrypt</h2>
    <input type="file" name="file" required>
    <select name="method">
      <option value="aes">AES-256-CBC</option>
      <option value="chacha20">ChaCha20</option>
    </select>
    <input type="password" name="key" placeholder="password" required>
    <button type="submit">Encrypt</button>
  </form>
  <form action="/decrypt" method="post" enctype="multipart/form-data">
    <h2>Decrypt</h2>
    <input type="file" name="file" required>
    <select name="method">
      <option value="aes">AES-256-CBC</option>
      <option value="chacha20">ChaCha20</option>
    </select>
    <input type="password" name="key" placeholder="password" required>
    <button type="submit">Decrypt</button>
  </form>
</body>
</html>
"#;

/// `GET /` — upload form.
pub async fn home() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// `POST /encrypt` — encrypt an uploaded file under a password.
///
/// Multipart fields: `file`, `method` (`aes` / `chacha20`), `key`. On
/// success the response body is the sealed envelope, served as an
/// `application/octet-stream` download named `<upload>.enc`.
pub async fn encrypt(State(state): State<AppState>, multipart: Multipart) -> Response {
    let form = match upload::read_form(multipart).await {
        Ok(f) => f,
        Err(e) => return reject(&e),
    };
    let algorithm = match Algorithm::from_selector(&form.method) {
        Ok(a) => a,
        Err(e) => return reject(&ServiceError::BadRequest(e.to_string())),
    };

    info!(
        file = %form.file_name,
        algorithm = %algorithm,
        size = form.data.len(),
        "encrypting upload"
    );

    let data = form.data;
    let password = form.password;
    let sealed =
        match tokio::task::spawn_blocking(move || envelope::encode(&data, algorithm, &password))
            .await
        {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "encryption task failed");
                return reject(&ServiceError::Internal("encryption failed".into()));
            }
        };

    let download_name = upload::encrypted_file_name(&form.file_name);
    finish_download(&state, "encrypted", "enc", sealed, &download_name).await
}

/// `POST /decrypt` — recover the plaintext of a previously sealed envelope.
///
/// Same multipart fields as `/encrypt`; `file` must carry an envelope and
/// `method` must name the algorithm it was sealed with.
pub async fn decrypt(State(state): State<AppState>, multipart: Multipart) -> Response {
    let form = match upload::read_form(multipart).await {
        Ok(f) => f,
        Err(e) => return reject(&e),
    };
    let algorithm = match Algorithm::from_selector(&form.method) {
        Ok(a) => a,
        Err(e) => return reject(&ServiceError::BadRequest(e.to_string())),
    };

    info!(
        file = %form.file_name,
        algorithm = %algorithm,
        size = form.data.len(),
        "decrypting upload"
    );

    let data = form.data;
    let password = form.password;
    let plaintext =
        match tokio::task::spawn_blocking(move || envelope::decode(&data, algorithm, &password))
            .await
        {
            Ok(Ok(bytes)) => bytes,
            Ok(Err(e)) => {
                warn!(error = %e, "decryption rejected");
                return reject(&classify(&e));
            }
            Err(e) => {
                warn!(error = %e, "decryption task failed");
                return reject(&ServiceError::Internal("decryption failed".into()));
            }
        };

    let download_name = upload::decrypted_file_name(&form.file_name);
    finish_download(&state, "decrypted", "bin", plaintext, &download_name).await
}

/// `GET /health` — liveness and readiness check.
///
/// Returns `200 OK` when the spool directory is ready, `503` otherwise.
pub async fn health(State(state): State<AppState>) -> Response {
    let storage_ready = state.storage.is_ready().await;

    let (status_code, status_str) = if storage_ready {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let body = HealthResponse {
        status: status_str.into(),
        storage_ready,
    };
    (status_code, Json(body)).into_response()
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

/// Map a codec failure onto the service error taxonomy.
///
/// Everything the caller can fix — wrong selector, wrong password, a file
/// this service did not produce — is a 400; only unusable ciphertext is a
/// server-side decryption failure.
fn classify(err: &EnvelopeError) -> ServiceError {
    match err {
        EnvelopeError::InvalidAlgorithm(_)
        | EnvelopeError::Malformed(_)
        | EnvelopeError::AlgorithmMismatch { .. }
        | EnvelopeError::AuthenticationFailed => ServiceError::BadRequest(err.to_string()),
        EnvelopeError::CorruptData => ServiceError::DecryptionFailure(err.to_string()),
    }
}

fn reject(err: &ServiceError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = ErrorResponse::new(err.error_code(), err.public_message());
    (status, Json(body)).into_response()
}

/// Spool the output artifact, then serve it as an attachment download.
async fn finish_download(
    state: &AppState,
    prefix: &str,
    extension: &str,
    payload: Vec<u8>,
    download_name: &str,
) -> Response {
    let spooled = match state.storage.store(prefix, extension, &payload).await {
        Ok(path) => path,
        Err(e) => {
            warn!(error = %e, "failed to spool output artifact");
            return reject(&ServiceError::Internal("failed to store output".into()));
        }
    };

    let response = (
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                "application/octet-stream".to_owned(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{download_name}\""),
            ),
        ],
        payload,
    )
        .into_response();

    state.storage.remove(&spooled).await;
    response
}
