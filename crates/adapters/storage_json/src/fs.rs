//! Atomic file replacement.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::StorageError;

/// Replace `path` with `bytes` without ever exposing a partial file.
///
/// Runs on the blocking pool since `tempfile` is synchronous.
pub(crate) async fn write_atomic(path: &Path, bytes: Vec<u8>) -> Result<(), StorageError> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || write_atomic_blocking(&path, &bytes)).await?
}

fn write_atomic_blocking(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let dir = parent_dir(path);
    std::fs::create_dir_all(&dir)?;
    let mut file = NamedTempFile::new_in(&dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path)?;
    Ok(())
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_use_current_dir_when_path_has_no_parent() {
        assert_eq!(parent_dir(Path::new("playhook.json")), PathBuf::from("."));
        assert_eq!(parent_dir(Path::new("data/playhook.json")), PathBuf::from("data"));
    }

    #[tokio::test]
    async fn should_create_missing_directories_when_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/file.json");

        write_atomic(&path, b"{}".to_vec()).await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"{}");
    }

    #[tokio::test]
    async fn should_replace_existing_content_when_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.json");
        std::fs::write(&path, "old content that is longer").unwrap();

        write_atomic(&path, b"new".to_vec()).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }
}
