//! File-backed state store.

use crate::{StateError, StateResult, StateStore};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// A [`StateStore`] persisted as a flat JSON object in a single file.
///
/// Every `put`/`delete` rewrites the file; the expected workload is one
/// watermark write per sync run, so no write batching is needed. The file is
/// created lazily on first write.
#[derive(Debug)]
pub struct FileStateStore {
    path: PathBuf,
    // Guards read-modify-write of the backing file within this process.
    write_lock: Mutex<()>,
}

impl FileStateStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn read_entries(&self) -> StateResult<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write_entries(&self, entries: &HashMap<String, String>) -> StateResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// The path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for FileStateStore {
    fn get(&self, key: &str) -> StateResult<Option<String>> {
        let entries = self.read_entries()?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> StateResult<()> {
        let _guard = self.write_lock.lock().map_err(|_| StateError::Poisoned)?;
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)?;
        debug!(key, value, path = %self.path.display(), "State written");
        Ok(())
    }

    fn delete(&self, key: &str) -> StateResult<bool> {
        let _guard = self.write_lock.lock().map_err(|_| StateError::Poisoned)?;
        let mut entries = self.read_entries()?;
        let removed = entries.remove(key).is_some();
        if removed {
            self.write_entries(&entries)?;
        }
        Ok(removed)
    }
}
