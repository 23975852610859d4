//! Library persistence

use crate::error::StorageError;
use crate::types::LibrarySnapshot;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// Result type for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Where the library snapshot lives
#[async_trait]
pub trait LibraryStore: Send + Sync {
    /// Load the library; a store that was never written yields an empty library
    async fn load(&self) -> StorageResult<LibrarySnapshot>;

    /// Replace the stored library
    async fn save(&self, library: &LibrarySnapshot) -> StorageResult<()>;

    /// Whether a library has been written to this store
    async fn exists(&self) -> StorageResult<bool>;
}

/// Read a JSON document, treating a missing file as the default value
pub async fn load_json<T>(path: &Path) -> StorageResult<T>
where
    T: DeserializeOwned + Default,
{
    match tokio::fs::read_to_string(path).await {
        Ok(data) => serde_json::from_str(&data)
            .map_err(|e| StorageError::Corrupt(format!("{}: {}", path.display(), e))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(T::default()),
        Err(e) => Err(StorageError::BackendError(e.to_string())),
    }
}

/// Write a JSON document atomically.
///
/// The data goes to a temp file next to the target, then is renamed over it.
pub async fn save_json<T: Serialize>(path: &Path, value: &T) -> StorageResult<()> {
    let data = serde_json::to_string_pretty(value)
        .map_err(|e| StorageError::BackendError(e.to_string()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))?;
    }

    let temp_path = path.with_extension("json.tmp");
    tokio::fs::write(&temp_path, &data)
        .await
        .map_err(|e| StorageError::BackendError(e.to_string()))?;
    tokio::fs::rename(&temp_path, path)
        .await
        .map_err(|e| StorageError::BackendError(e.to_string()))
}

/// Library stored as a single JSON file
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LibraryStore for JsonFileStore {
    async fn load(&self) -> StorageResult<LibrarySnapshot> {
        let library: LibrarySnapshot = load_json(&self.path).await?;
        tracing::debug!(
            path = %self.path.display(),
            mangas = library.len(),
            "Loaded library"
        );
        Ok(library)
    }

    async fn save(&self, library: &LibrarySnapshot) -> StorageResult<()> {
        save_json(&self.path, library).await?;
        tracing::debug!(
            path = %self.path.display(),
            mangas = library.len(),
            "Saved library"
        );
        Ok(())
    }

    async fn exists(&self) -> StorageResult<bool> {
        tokio::fs::try_exists(&self.path)
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))
    }
}

/// In-memory library store (for testing)
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<Option<LibrarySnapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_library(library: LibrarySnapshot) -> Self {
        Self {
            data: RwLock::new(Some(library)),
        }
    }
}

#[async_trait]
impl LibraryStore for MemoryStore {
    async fn load(&self) -> StorageResult<LibrarySnapshot> {
        Ok(self.data.read().await.clone().unwrap_or_default())
    }

    async fn save(&self, library: &LibrarySnapshot) -> StorageResult<()> {
        *self.data.write().await = Some(library.clone());
        Ok(())
    }

    async fn exists(&self) -> StorageResult<bool> {
        Ok(self.data.read().await.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Manga;

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryStore::new();
        assert!(!store.exists().await.unwrap());
        assert!(store.load().await.unwrap().is_empty());

        let mut library = LibrarySnapshot::new();
        library.upsert(Manga::new(1, "Stored"));
        store.save(&library).await.unwrap();

        assert!(store.exists().await.unwrap());
        assert_eq!(store.load().await.unwrap(), library);
    }

    #[tokio::test]
    async fn test_json_file_store() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("library.json"));

        // Missing file loads as an empty library
        assert!(store.load().await.unwrap().is_empty());
        assert!(!store.exists().await.unwrap());

        let mut library = LibrarySnapshot::new();
        library.upsert(Manga::new(1, "Persisted").with_chapter_counts(1, 2));
        store.save(&library).await.unwrap();

        assert!(store.exists().await.unwrap());
        assert_eq!(store.load().await.unwrap(), library);
        assert!(!dir.path().join("nested").join("library.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_corrupt_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("library.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let err = JsonFileStore::new(&path).load().await.unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(_)));
    }
}
