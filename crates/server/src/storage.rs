//! [`Storage`]: lifecycle of the on-disk spool for output artifacts.
//!
//! Every successful encrypt/decrypt writes its artifact here under a unique
//! name and removes it once the response is built; leftover files from a
//! crashed run are swept at startup.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

/// Spool directory collaborator.
///
/// Cheaply cloneable so that Axum can clone it into every request handler.
#[derive(Clone, Debug)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Create a [`Storage`] rooted at `root`. The directory is not touched
    /// until [`Storage::ensure`] is called.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The spool directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the spool directory if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the directory cannot be created.
    pub async fn ensure(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Returns `true` if the spool directory exists.
    pub async fn is_ready(&self) -> bool {
        tokio::fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }

    /// Delete leftover artifacts from a previous run.
    ///
    /// Only regular files directly under the root are removed. Returns the
    /// number of files deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read; individual file
    /// removals are best-effort.
    pub async fn sweep(&self) -> std::io::Result<usize> {
        let mut removed = 0;
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let is_file = entry
                .file_type()
                .await
                .map(|t| t.is_file())
                .unwrap_or(false);
            if is_file && tokio::fs::remove_file(entry.path()).await.is_ok() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Write an output artifact under a fresh unique name and return its path.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file cannot be written.
    pub async fn store(
        &self,
        prefix: &str,
        extension: &str,
        data: &[u8],
    ) -> std::io::Result<PathBuf> {
        let path = self
            .root
            .join(format!("{prefix}_{}.{extension}", Uuid::new_v4()));
        tokio::fs::write(&path, data).await?;
        Ok(path)
    }

    /// Remove a spooled artifact. Failures are logged, never fatal.
    pub async fn remove(&self, path: &Path) {
        match tokio::fs::remove_file(path).await {
            Ok(()) => debug!(path = %path.display(), "cleaned up spool file"),
            Err(e) => warn!(path = %path.display(), error = %e, "failed to clean up spool file"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ensure_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path().join("spool"));
        assert!(!storage.is_ready().await);
        storage.ensure().await.unwrap();
        assert!(storage.is_ready().await);
    }

    #[tokio::test]
    async fn store_writes_uniquely_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());
        let a = storage.store("encrypted", "enc", b"one").await.unwrap();
        let b = storage.store("encrypted", "enc", b"two").await.unwrap();
        assert_ne!(a, b);
        assert_eq!(std::fs::read(&a).unwrap(), b"one");
        let name = a.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("encrypted_"));
        assert!(name.ends_with(".enc"));
    }

    #[tokio::test]
    async fn remove_deletes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());
        let path = storage.store("decrypted", "bin", b"data").await.unwrap();
        storage.remove(&path).await;
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn sweep_clears_leftover_files() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());
        storage.store("encrypted", "enc", b"stale").await.unwrap();
        storage.store("decrypted", "bin", b"stale").await.unwrap();
        assert_eq!(storage.sweep().await.unwrap(), 2);
        assert_eq!(storage.sweep().await.unwrap(), 0);
    }
}
