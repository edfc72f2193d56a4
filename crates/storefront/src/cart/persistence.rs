//! Durable storage seam for the cart snapshot.
//!
//! Mirrors a browser's local storage contract: one serialized record under
//! one well-known key, overwritten wholesale on every save. `load` treats
//! missing and unreadable values identically so a corrupt snapshot never
//! blocks startup.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

/// Errors a storage backend can report on save.
///
/// Saves are best-effort: the store logs these and keeps operating
/// in-memory, so they never reach UI code.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure (disk full, permissions, ...).
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Backend rejected the write.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable key-value storage the cart store reads at startup and writes
/// on every mutation.
pub trait CartStorage: Send + Sync {
    /// The last-saved snapshot text, or `None` if none exists or the
    /// value cannot be read. Never fails.
    fn load(&self) -> Option<String>;

    /// Durably store the snapshot, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the write fails; callers treat this
    /// as best-effort and continue without durability.
    fn save(&self, snapshot: &str) -> Result<(), StorageError>;
}

impl<T: CartStorage + ?Sized> CartStorage for std::sync::Arc<T> {
    fn load(&self) -> Option<String> {
        (**self).load()
    }

    fn save(&self, snapshot: &str) -> Result<(), StorageError> {
        (**self).save(snapshot)
    }
}

/// File-backed storage: the snapshot lives in a single JSON file.
///
/// Writes go through a temp file and rename so a crash mid-write leaves
/// the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct FileCartStorage {
    path: PathBuf,
}

impl FileCartStorage {
    /// Storage rooted at the given snapshot file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The snapshot file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartStorage for FileCartStorage {
    fn load(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Some(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read cart snapshot");
                None
            }
        }
    }

    fn save(&self, snapshot: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        {
            let mut file = std::fs::File::create(&tmp)?;
            file.write_all(snapshot.as_bytes())?;
            file.sync_all()?;
        }
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryCartStorage {
    value: Mutex<Option<String>>,
    fail_saves: bool,
}

impl MemoryCartStorage {
    /// Empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with a snapshot, as if left by a prior session.
    #[must_use]
    pub fn with_snapshot(snapshot: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(snapshot.into())),
            fail_saves: false,
        }
    }

    /// Storage whose saves always fail, for exercising the degrade-to-
    /// in-memory path.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            value: Mutex::new(None),
            fail_saves: true,
        }
    }

    /// The currently stored snapshot, if any.
    #[must_use]
    pub fn stored(&self) -> Option<String> {
        self.value.lock().map(|guard| guard.clone()).ok().flatten()
    }
}

impl CartStorage for MemoryCartStorage {
    fn load(&self) -> Option<String> {
        self.stored()
    }

    fn save(&self, snapshot: &str) -> Result<(), StorageError> {
        if self.fail_saves {
            return Err(StorageError::Unavailable("simulated quota exceeded".to_string()));
        }
        match self.value.lock() {
            Ok(mut guard) => {
                *guard = Some(snapshot.to_string());
                Ok(())
            }
            Err(_) => Err(StorageError::Unavailable("poisoned lock".to_string())),
        }
    }
}
