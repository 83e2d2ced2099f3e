//! Blob store trait and the in-process backend.

use crate::CacheError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Synchronous storage of opaque bytes under string keys.
///
/// `write` replaces the whole value in a single operation: readers see
/// either the previous blob or the new one, never a mix.
pub trait BlobStore: Send + Sync {
    /// Read a blob. Returns `None` if the key doesn't exist.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Write a blob, replacing any existing content.
    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), CacheError>;
}

/// In-process blob store.
///
/// Clones share the same underlying map, so a test can keep a handle and
/// inspect what a cart wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    writes: Arc<Mutex<u64>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with one blob.
    pub fn with_entry(key: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let store = Self::new();
        lock(&store.entries).insert(key.into(), bytes.into());
        store
    }

    /// Number of successful writes since creation.
    pub fn write_count(&self) -> u64 {
        *lock(&self.writes)
    }
}

impl BlobStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(lock(&self.entries).get(key).cloned())
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), CacheError> {
        lock(&self.entries).insert(key.to_string(), bytes.to_vec());
        *lock(&self.writes) += 1;
        Ok(())
    }
}

// A panic while holding the lock cannot leave a half-written entry behind,
// so a poisoned map is still consistent.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_key() {
        let store = MemoryStore::new();
        assert!(store.read("cart").unwrap().is_none());
    }

    #[test]
    fn test_write_replaces_value() {
        let store = MemoryStore::new();
        store.write("cart", b"one").unwrap();
        store.write("cart", b"two").unwrap();

        assert_eq!(store.read("cart").unwrap().as_deref(), Some(&b"two"[..]));
        assert_eq!(store.write_count(), 2);
    }

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let handle = store.clone();
        store.write("cart", b"[]").unwrap();

        assert_eq!(handle.read("cart").unwrap().as_deref(), Some(&b"[]"[..]));
        assert_eq!(handle.write_count(), 1);
    }

    #[test]
    fn test_seeded_entry() {
        let store = MemoryStore::with_entry("cart", "[]");
        assert_eq!(store.read("cart").unwrap().as_deref(), Some(&b"[]"[..]));
        assert_eq!(store.write_count(), 0);
    }
}
