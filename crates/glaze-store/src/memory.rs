//! In-memory artifact store.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{ArtifactStore, StoreError, validate_key};

/// [`ArtifactStore`] backed by a map, with a write counter for assertions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `write` calls so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Stored keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.lock().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Drop an entry, simulating a deleted artifact.
    pub fn remove(&self, key: &str) -> bool {
        self.lock().remove(key).is_some()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
        // A poisoned map is still consistent: every mutation is a single insert/remove.
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl ArtifactStore for MemoryStore {
    fn exists(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    fn read(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        self.lock()
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.to_owned()))
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        validate_key(key)?;
        self.lock().insert(key.to_owned(), bytes.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_write_then_read() {
        let store = MemoryStore::new();
        store.write("a.png", b"data").unwrap();

        assert!(store.exists("a.png"));
        assert_eq!(store.read("a.png").unwrap(), b"data".to_vec());
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn test_remove() {
        let store = MemoryStore::new();
        store.write("a.png", b"data").unwrap();

        assert!(store.remove("a.png"));
        assert!(!store.exists("a.png"));
        assert!(!store.remove("a.png"));
    }

    #[test]
    fn test_keys_sorted() {
        let store = MemoryStore::new();
        store.write("b.png", b"").unwrap();
        store.write("a.png", b"").unwrap();

        assert_eq!(store.keys(), vec!["a.png".to_owned(), "b.png".to_owned()]);
    }

    #[test]
    fn test_invalid_key_not_counted() {
        let store = MemoryStore::new();
        assert!(store.write("../x.png", b"").is_err());
        assert_eq!(store.write_count(), 0);
    }
}
