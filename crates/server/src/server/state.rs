//! Shared application state injected into every Axum handler.

use crate::storage::Storage;

/// Application state shared across all request handlers.
///
/// All fields are cheaply cloneable so that Axum can clone the state for
/// each request without copying expensive data.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Spool directory collaborator for output artifacts.
    pub storage: Storage,
}

impl AppState {
    /// Create a new [`AppState`] with the provided storage collaborator.
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

impl Default for AppState {
    /// Creates a default [`AppState`] pointing at the conventional spool
    /// path, suitable for tests. The directory is not created.
    fn default() -> Self {
        Self::new(Storage::new("uploads"))
    }
}
