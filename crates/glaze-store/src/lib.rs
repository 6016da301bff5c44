//! Artifact storage for glaze.
//!
//! Generated side artifacts (OG images) are content-addressed by a flat key
//! such as `my-post.png`. Producers ask the store whether a key already exists
//! and skip the work when it does. The [`ArtifactStore`] trait decouples that
//! check from the storage mechanism:
//!
//! - [`FileStore`]: files under a root directory on disk
//! - [`MemoryStore`]: in-process map, used in tests and dry runs
//!
//! # Example
//!
//! ```
//! use glaze_store::{ArtifactStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! assert!(!store.exists("og-image.png"));
//! store.write("og-image.png", b"\x89PNG").unwrap();
//! assert!(store.exists("og-image.png"));
//! ```

mod file;
mod memory;

use std::path::{Component, Path};

pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Key is empty, absolute, or escapes the store root.
    #[error("Invalid artifact key: {0}")]
    InvalidKey(String),
    /// Key does not exist in the store.
    #[error("Artifact not found: {0}")]
    NotFound(String),
    /// I/O error while reading or writing.
    #[error("I/O error for {key}: {source}")]
    Io {
        /// Artifact key being accessed.
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// Key-addressed storage for generated artifacts.
///
/// Implementations must be safe to share across the build's worker threads.
/// Keys are relative, `/`-separated names; a key never contains `..`.
pub trait ArtifactStore: Send + Sync {
    /// Whether an artifact is stored under `key`.
    fn exists(&self, key: &str) -> bool;

    /// Read the artifact stored under `key`.
    fn read(&self, key: &str) -> Result<Vec<u8>, StoreError>;

    /// Store `bytes` under `key`, replacing any previous artifact.
    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError>;
}

/// Reject keys that are empty, absolute, or walk out of the store root.
pub(crate) fn validate_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty() {
        return Err(StoreError::InvalidKey(key.to_owned()));
    }
    let valid = Path::new(key)
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if !valid {
        return Err(StoreError::InvalidKey(key.to_owned()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key_accepts_flat_and_nested() {
        assert!(validate_key("og-image.png").is_ok());
        assert!(validate_key("posts/hello.png").is_ok());
    }

    #[test]
    fn test_validate_key_rejects_escapes() {
        assert!(validate_key("").is_err());
        assert!(validate_key("../secret.png").is_err());
        assert!(validate_key("/etc/passwd").is_err());
        assert!(validate_key("a/../../b.png").is_err());
    }
}
