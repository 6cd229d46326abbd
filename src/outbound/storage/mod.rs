//! File store for uploaded documents and profile photos.
//!
//! Owns the uploads root directory. Stored names are collision-resistant: a
//! random 32-hex tag prefixes the sanitized original filename, so two uploads
//! of the same name never overwrite each other. Writes and removes run on the
//! blocking thread pool.

use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

/// Fallback stem when sanitisation strips a name to nothing.
const FALLBACK_NAME: &str = "file";

/// Errors surfaced by file store operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A stored name escaped the uploads root.
    #[error("invalid stored filename: {name}")]
    InvalidName { name: String },

    /// Writing the file failed.
    #[error("failed to write {name}: {source}")]
    Write {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Removing the file failed.
    #[error("failed to remove {name}: {source}")]
    Remove {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Replace every byte outside `[A-Za-z0-9._-]` with `_`.
///
/// An all-replaced or empty input falls back to `file` so the stored name
/// never collapses to punctuation alone.
pub fn sanitize_filename(original: &str) -> String {
    let cleaned: String = original
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-') {
                ch
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.chars().all(|ch| ch == '_' || ch == '.') || cleaned.is_empty() {
        FALLBACK_NAME.to_owned()
    } else {
        cleaned
    }
}

/// Uploads-directory owner with collision-resistant naming.
///
/// # Example
///
/// ```ignore
/// let store = FileStore::new("uploads")?;
/// let stored = store.save("rapport annuel.pdf", bytes).await?;
/// store.remove(&stored).await?;
/// ```
#[derive(Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open the store, creating the root directory when absent.
    pub fn new(root: impl Into<PathBuf>) -> std::io::Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Return the uploads root path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn stored_name(original: &str) -> String {
        let tag = Uuid::new_v4().simple();
        format!("{tag}-{}", sanitize_filename(original))
    }

    fn guard_name(&self, name: &str) -> Result<PathBuf, StorageError> {
        // Stored names are single path components; anything else is hostile.
        if name.is_empty()
            || name.contains('/')
            || name.contains('\\')
            || name == "."
            || name == ".."
        {
            return Err(StorageError::InvalidName {
                name: name.to_owned(),
            });
        }
        Ok(self.root.join(name))
    }

    /// Write `bytes` under a fresh collision-resistant name derived from the
    /// client-supplied filename. Returns the stored name.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Write` when the filesystem rejects the write.
    pub async fn save(&self, original: &str, bytes: Vec<u8>) -> Result<String, StorageError> {
        let name = Self::stored_name(original);
        let path = self.guard_name(&name)?;
        let stored = name.clone();
        tokio::task::spawn_blocking(move || std::fs::write(path, bytes))
            .await
            .map_err(|err| StorageError::Write {
                name: name.clone(),
                source: std::io::Error::other(err),
            })?
            .map_err(|source| StorageError::Write { name, source })?;
        Ok(stored)
    }

    /// Remove a stored file. Removing a missing file succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidName` for names escaping the root and
    /// `StorageError::Remove` for other filesystem failures.
    pub async fn remove(&self, name: &str) -> Result<(), StorageError> {
        let path = self.guard_name(name)?;
        let name = name.to_owned();
        tokio::task::spawn_blocking(move || match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err),
        })
        .await
        .map_err(|err| StorageError::Remove {
            name: name.clone(),
            source: std::io::Error::other(err),
        })?
        .map_err(|source| StorageError::Remove { name, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn store() -> (tempfile::TempDir, FileStore) {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = FileStore::new(dir.path().join("uploads")).expect("store opens");
        (dir, store)
    }

    #[rstest]
    #[case("rapport annuel.pdf", "rapport_annuel.pdf")]
    #[case("Scan-2024.pdf", "Scan-2024.pdf")]
    #[case("..\\..\\etc\\passwd", ".._.._etc_passwd")]
    #[case("données.pdf", "donn_es.pdf")]
    #[case("///", "file")]
    #[case("", "file")]
    fn sanitises_filenames(#[case] original: &str, #[case] expected: &str) {
        assert_eq!(sanitize_filename(original), expected);
    }

    #[tokio::test]
    async fn save_stores_bytes_under_prefixed_name() {
        let (_dir, store) = store();
        let stored = store
            .save("rapport.pdf", b"content".to_vec())
            .await
            .expect("save succeeds");

        assert!(stored.ends_with("-rapport.pdf"));
        assert_eq!(stored.len(), 32 + 1 + "rapport.pdf".len());
        let on_disk = std::fs::read(store.root().join(&stored)).expect("file readable");
        assert_eq!(on_disk, b"content");
    }

    #[tokio::test]
    async fn identical_names_store_distinct_files() {
        let (_dir, store) = store();
        let first = store
            .save("scan.pdf", b"first".to_vec())
            .await
            .expect("first save");
        let second = store
            .save("scan.pdf", b"second".to_vec())
            .await
            .expect("second save");

        assert_ne!(first, second);
        assert_eq!(
            std::fs::read(store.root().join(&first)).expect("first readable"),
            b"first"
        );
        assert_eq!(
            std::fs::read(store.root().join(&second)).expect("second readable"),
            b"second"
        );
    }

    #[tokio::test]
    async fn remove_tolerates_missing_files() {
        let (_dir, store) = store();
        store
            .remove("0123456789abcdef0123456789abcdef-gone.pdf")
            .await
            .expect("missing file remove succeeds");
    }

    #[tokio::test]
    async fn remove_deletes_stored_files() {
        let (_dir, store) = store();
        let stored = store
            .save("scan.pdf", b"bytes".to_vec())
            .await
            .expect("save succeeds");
        store.remove(&stored).await.expect("remove succeeds");
        assert!(!store.root().join(&stored).exists());
    }

    #[rstest]
    #[case("../escape.pdf")]
    #[case("a/b.pdf")]
    #[case("..")]
    #[case("")]
    #[tokio::test]
    async fn remove_rejects_traversal_names(#[case] name: &str) {
        let (_dir, store) = store();
        let err = store.remove(name).await.expect_err("rejected");
        assert!(matches!(err, StorageError::InvalidName { .. }));
    }
}
