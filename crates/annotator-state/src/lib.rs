//! Durable key-value sync state for the ads activity annotator.
//!
//! The sync engine persists exactly one key — the incremental watermark under
//! [`LAST_SYNC_TIME_KEY`] — but the store is a generic string key-value
//! interface so tests can substitute an in-memory backend and assert exact
//! before/after values.

mod error;
mod file;
mod memory;

pub use error::{StateError, StateResult};
pub use file::FileStateStore;
pub use memory::MemoryStateStore;

/// Key under which the incremental sync watermark is stored, as a
/// decimal-string Unix-second value.
pub const LAST_SYNC_TIME_KEY: &str = "last_sync_time";

/// Trait for durable state backends.
pub trait StateStore: Send + Sync {
    /// Retrieve a value.
    fn get(&self, key: &str) -> StateResult<Option<String>>;

    /// Store a value.
    fn put(&self, key: &str, value: &str) -> StateResult<()>;

    /// Delete a value.
    fn delete(&self, key: &str) -> StateResult<bool>;

    /// Check if a key exists.
    fn has(&self, key: &str) -> StateResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_defaults_through_get() {
        let store = MemoryStateStore::new();
        assert!(!store.has("missing").unwrap());
        store.put("present", "1").unwrap();
        assert!(store.has("present").unwrap());
    }
}
