//! Storage-specific error type wrapping IO and JSON errors.

use playhook_domain::error::PlayhookError;

/// Errors originating from the JSON storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing a file failed.
    #[error("io error")]
    Io(#[from] std::io::Error),

    /// The stored document could not be encoded or decoded.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    /// The stored document could not be decoded and was moved to `kept`.
    #[error("document could not be decoded, kept a copy at {}", .kept.display())]
    Corrupt {
        kept: std::path::PathBuf,
        source: serde_json::Error,
    },

    /// Saving is disabled because an undecodable document is still in place.
    #[error("refusing to overwrite undecodable document at {}", .0.display())]
    Locked(std::path::PathBuf),

    /// The temporary file could not replace the target.
    #[error("could not replace file")]
    Persist(#[from] tempfile::PersistError),

    /// The blocking write task did not complete.
    #[error("write task failed")]
    Task(#[from] tokio::task::JoinError),
}

impl From<StorageError> for PlayhookError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
