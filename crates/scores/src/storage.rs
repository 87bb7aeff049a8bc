//! Where the leaderboard payload lives
//!
//! Backends move an opaque JSON document in and out; decoding and recovery
//! from bad data are the leaderboard's job.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::ScoresError;

pub trait LeaderboardStorage {
    /// The stored payload, `None` when nothing has been saved yet
    fn load(&self) -> Result<Option<String>, ScoresError>;

    fn store(&mut self, payload: &str) -> Result<(), ScoresError>;
}

/// JSON file on disk; parent directories are created on the first write
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LeaderboardStorage for FileStorage {
    fn load(&self) -> Result<Option<String>, ScoresError> {
        match fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn store(&mut self, payload: &str) -> Result<(), ScoresError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, payload)?;
        Ok(())
    }
}

/// In-process storage for tests and throwaway sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    payload: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
        }
    }

    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }
}

impl LeaderboardStorage for MemoryStorage {
    fn load(&self) -> Result<Option<String>, ScoresError> {
        Ok(self.payload.clone())
    }

    fn store(&mut self, payload: &str) -> Result<(), ScoresError> {
        self.payload = Some(payload.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("leaderboard.json"));
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn test_file_storage_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("leaderboard.json");
        let mut storage = FileStorage::new(&path);

        storage.store("[]").unwrap();

        assert!(path.exists());
        assert_eq!(storage.load().unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_storage_read_error_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be.
        let storage = FileStorage::new(dir.path());
        assert!(matches!(storage.load(), Err(ScoresError::Io(_))));
    }

    #[test]
    fn test_memory_storage_round_trip() {
        let mut storage = MemoryStorage::new();
        assert!(storage.load().unwrap().is_none());
        storage.store("[1]").unwrap();
        assert_eq!(storage.payload(), Some("[1]"));
    }
}
