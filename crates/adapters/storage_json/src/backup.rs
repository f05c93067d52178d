//! Timestamped whole-document backups with count-based retention.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use playhook_domain::document::Document;

use crate::error::StorageError;
use crate::fs::write_atomic;

const PREFIX: &str = "playhook-";
const SUFFIX: &str = ".json";

/// Writes backups into one directory, keeping at most `retention` of them.
#[derive(Debug, Clone)]
pub struct Backups {
    dir: PathBuf,
    retention: usize,
}

impl Backups {
    /// `retention` is clamped to at least one backup.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, retention: usize) -> Self {
        Self {
            dir: dir.into(),
            retention: retention.max(1),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write a backup named after the current local time.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backup cannot be written or old ones
    /// cannot be listed.
    pub async fn write(&self, document: &Document) -> Result<PathBuf, StorageError> {
        self.write_at(document, Local::now()).await
    }

    /// Write a backup named after `at`, then prune the oldest ones.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backup cannot be written or old ones
    /// cannot be listed.
    pub async fn write_at(
        &self,
        document: &Document,
        at: DateTime<Local>,
    ) -> Result<PathBuf, StorageError> {
        let path = self.dir.join(file_name(at));
        let bytes = serde_json::to_vec_pretty(document)?;
        write_atomic(&path, bytes).await?;
        tracing::info!(path = %path.display(), "backup written");
        self.prune().await?;
        Ok(path)
    }

    /// Backup files currently in the directory, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the directory cannot be read.
    pub async fn list(&self) -> Result<Vec<PathBuf>, StorageError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        let mut backups = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            if name
                .to_str()
                .is_some_and(|name| name.starts_with(PREFIX) && name.ends_with(SUFFIX))
            {
                backups.push(entry.path());
            }
        }
        // The timestamp format sorts lexically in chronological order.
        backups.sort();
        Ok(backups)
    }

    async fn prune(&self) -> Result<(), StorageError> {
        let backups = self.list().await?;
        let excess = backups.len().saturating_sub(self.retention);
        for path in backups.into_iter().take(excess) {
            match tokio::fs::remove_file(&path).await {
                Ok(()) => tracing::debug!(path = %path.display(), "old backup removed"),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "could not remove old backup");
                }
            }
        }
        Ok(())
    }
}

fn file_name(at: DateTime<Local>) -> String {
    format!("{PREFIX}{}{SUFFIX}", at.format("%Y%m%d-%H%M%S"))
}
