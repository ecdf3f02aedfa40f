//! String key-value store with memory and file backends.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use super::RepositoryError;

type Entries = BTreeMap<String, String>;

/// A key-value store of strings.
///
/// Every operation takes the store lock, so concurrent writers never
/// interleave a read-modify-write of the backing file.
#[derive(Debug)]
pub enum KeyValueStore {
    Memory(Mutex<Entries>),
    File { path: PathBuf, lock: Mutex<()> },
}

impl KeyValueStore {
    #[must_use]
    pub fn memory() -> Self {
        Self::Memory(Mutex::new(Entries::new()))
    }

    /// A store persisted as a JSON object at `path`. The file is created on first write.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Get the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backing file cannot be read or parsed.
    pub async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        match self {
            Self::Memory(entries) => Ok(entries.lock().await.get(key).cloned()),
            Self::File { path, lock } => {
                let _guard = lock.lock().await;
                Ok(read_entries(path).await?.remove(key))
            }
        }
    }

    /// Set `key` to `value`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backing file cannot be read or written.
    pub async fn set(&self, key: &str, value: String) -> Result<(), RepositoryError> {
        match self {
            Self::Memory(entries) => {
                entries.lock().await.insert(key.to_string(), value);
                Ok(())
            }
            Self::File { path, lock } => {
                let _guard = lock.lock().await;
                let mut entries = read_entries(path).await?;
                entries.insert(key.to_string(), value);
                write_entries(path, &entries).await
            }
        }
    }

    /// Whether this store keeps data across restarts.
    #[must_use]
    pub const fn is_persistent(&self) -> bool {
        matches!(self, Self::File { .. })
    }
}

async fn read_entries(path: &Path) -> Result<Entries, RepositoryError> {
    match tokio::fs::read_to_string(path).await {
        Ok(raw) if raw.trim().is_empty() => Ok(Entries::new()),
        Ok(raw) => Ok(serde_json::from_str(&raw)?),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Entries::new()),
        Err(e) => Err(e.into()),
    }
}

async fn write_entries(path: &Path, entries: &Entries) -> Result<(), RepositoryError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let raw = serde_json::to_string_pretty(entries)?;
    // Replace atomically.
    let tmp = path.with_extension("tmp");
    tokio::fs::write(&tmp, raw).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store() {
        let store = KeyValueStore::memory();
        assert_eq!(store.get("reviews").await.unwrap(), None);
        store.set("reviews", "[]".to_string()).await.unwrap();
        assert_eq!(store.get("reviews").await.unwrap().as_deref(), Some("[]"));
        assert!(!store.is_persistent());
    }

    #[tokio::test]
    async fn test_file_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("store.json");

        let store = KeyValueStore::file(&path);
        assert_eq!(store.get("reviews").await.unwrap(), None);
        store.set("reviews", "[1]".to_string()).await.unwrap();

        let reopened = KeyValueStore::file(&path);
        assert_eq!(reopened.get("reviews").await.unwrap().as_deref(), Some("[1]"));
        assert!(reopened.is_persistent());
    }

    #[tokio::test]
    async fn test_unreadable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        tokio::fs::write(&path, "not json").await.unwrap();

        let store = KeyValueStore::file(&path);
        assert!(matches!(
            store.get("reviews").await,
            Err(RepositoryError::Serialization(_))
        ));
    }
}
