//! File-based artifact store.
//!
//! [`FileStore`] maps each key to a file below a root directory. Parent
//! directories are created on write, so a fresh checkout with no output
//! directory works without setup.

use std::fs;
use std::path::PathBuf;

use crate::{ArtifactStore, StoreError, validate_key};

/// [`ArtifactStore`] rooted at a directory on disk.
///
/// Directory layout:
/// ```text
/// {root}/
/// +-- og-image.png       # site-wide fallback
/// +-- my-post.png        # one file per document slug
/// +-- ...
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`. The directory is created lazily.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }
}

impl ArtifactStore for FileStore {
    fn exists(&self, key: &str) -> bool {
        self.path_for(key).is_ok_and(|path| path.is_file())
    }

    fn read(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.path_for(key)?;
        fs::read(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound(key.to_owned())
            } else {
                StoreError::Io {
                    key: key.to_owned(),
                    source: e,
                }
            }
        })
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let io_err = |source| StoreError::Io {
            key: key.to_owned(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(&path, bytes).map_err(io_err)?;

        tracing::debug!(key, bytes = bytes.len(), "Wrote artifact");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_missing_root() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().join("public/og-images"));

        store.write("hello.png", b"png-bytes").unwrap();

        assert!(tmp.path().join("public/og-images/hello.png").is_file());
        assert_eq!(store.read("hello.png").unwrap(), b"png-bytes".to_vec());
    }

    #[test]
    fn test_exists() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().to_path_buf());

        assert!(!store.exists("og-image.png"));
        store.write("og-image.png", b"x").unwrap();
        assert!(store.exists("og-image.png"));
    }

    #[test]
    fn test_exists_ignores_directories() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("dir.png")).unwrap();
        let store = FileStore::new(tmp.path().to_path_buf());

        assert!(!store.exists("dir.png"));
    }

    #[test]
    fn test_read_missing_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().to_path_buf());

        let err = store.read("missing.png").unwrap_err();
        assert!(matches!(err, StoreError::NotFound(key) if key == "missing.png"));
    }

    #[test]
    fn test_overwrite() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().to_path_buf());

        store.write("a.png", b"first").unwrap();
        store.write("a.png", b"second").unwrap();

        assert_eq!(store.read("a.png").unwrap(), b"second".to_vec());
    }

    #[test]
    fn test_rejects_escaping_key() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().join("root"));

        assert!(matches!(
            store.write("../outside.png", b"x"),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(!tmp.path().join("outside.png").exists());
        assert!(!store.exists("../outside.png"));
    }
}
