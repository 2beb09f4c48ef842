//! In-memory state store for tests and ephemeral runs.

use crate::{StateError, StateResult, StateStore};
use std::collections::HashMap;
use std::sync::Mutex;

/// A [`StateStore`] backed by a plain in-memory map.
///
/// Values do not survive the process; useful in tests and as a fallback when
/// no state file is configured.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStateStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn get(&self, key: &str) -> StateResult<Option<String>> {
        let entries = self.entries.lock().map_err(|_| StateError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> StateResult<()> {
        let mut entries = self.entries.lock().map_err(|_| StateError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> StateResult<bool> {
        let mut entries = self.entries.lock().map_err(|_| StateError::Poisoned)?;
        Ok(entries.remove(key).is_some())
    }
}
