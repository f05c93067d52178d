//! [`DocumentStore`] backed by a single JSON file.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Local};
use playhook_app::ports::DocumentStore;
use playhook_domain::document::Document;
use playhook_domain::error::PlayhookError;

use crate::error::StorageError;
use crate::fs::write_atomic;

/// Stores the whole document as pretty-printed JSON.
///
/// A file that cannot be decoded is moved aside to
/// `<file>.corrupt-YYYYMMDD-HHMMSS` before the load fails, so the next save
/// never overwrites it. If it cannot be moved aside, saving is refused.
#[derive(Debug, Clone)]
pub struct JsonDocumentStore {
    path: PathBuf,
    locked: Arc<AtomicBool>,
}

impl JsonDocumentStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            locked: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Option<Document>, StorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        match serde_json::from_slice(&bytes) {
            Ok(document) => Ok(Some(document)),
            Err(source) => Err(self.set_aside(source, Local::now()).await),
        }
    }

    /// Move the undecodable file out of the way, or lock the store.
    async fn set_aside(&self, source: serde_json::Error, now: DateTime<Local>) -> StorageError {
        let kept = corrupt_path(&self.path, now);
        match tokio::fs::rename(&self.path, &kept).await {
            Ok(()) => {
                tracing::warn!(
                    path = %self.path.display(),
                    kept = %kept.display(),
                    "unreadable document moved aside"
                );
                StorageError::Corrupt { kept, source }
            }
            Err(err) => {
                tracing::error!(
                    path = %self.path.display(),
                    error = %err,
                    "unreadable document could not be moved aside, saving disabled"
                );
                self.locked.store(true, Ordering::SeqCst);
                StorageError::Json(source)
            }
        }
    }

    async fn write(&self, document: &Document) -> Result<(), StorageError> {
        if self.locked.load(Ordering::SeqCst) {
            return Err(StorageError::Locked(self.path.clone()));
        }
        let bytes = serde_json::to_vec_pretty(document)?;
        write_atomic(&self.path, bytes).await
    }
}

impl DocumentStore for JsonDocumentStore {
    async fn load(&self) -> Result<Option<Document>, PlayhookError> {
        let document = self.read().await?;
        if document.is_none() {
            tracing::debug!(path = %self.path.display(), "no stored document yet");
        }
        Ok(document)
    }

    async fn save(&self, document: &Document) -> Result<(), PlayhookError> {
        self.write(document).await?;
        tracing::debug!(path = %self.path.display(), "document saved");
        Ok(())
    }
}

fn corrupt_path(path: &Path, now: DateTime<Local>) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(|| OsString::from("document"), OsString::from);
    name.push(now.format(".corrupt-%Y%m%d-%H%M%S").to_string());
    path.with_file_name(name)
}
