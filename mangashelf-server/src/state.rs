//! Application state

use anyhow::Result;
use mangashelf_core::storage::{load_json, save_json, JsonFileStore, LibraryStore};
use mangashelf_core::{ChapterListOptions, LibraryOptions, LibrarySnapshot};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Where the library snapshot is persisted
    pub store: Arc<dyn LibraryStore>,

    /// Base path for storage
    pub storage_path: PathBuf,

    /// In-memory library, written through to `store`
    pub library: Arc<RwLock<LibrarySnapshot>>,

    /// Persisted view settings
    pub settings: Arc<RwLock<ServerSettings>>,

    /// Channel for SSE events
    pub event_tx: broadcast::Sender<ServerEvent>,
}

/// Settings owned by the server and applied to every library view request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Bypass filters while a search query is active
    pub ignore_filters: bool,

    /// Default filter/sort configuration of the library view
    pub library_options: LibraryOptions,

    /// Default configuration of chapter lists
    pub chapter_options: ChapterListOptions,
}

/// Server-sent events
#[derive(Debug, Clone)]
pub enum ServerEvent {
    /// A manga was added to or replaced in the library
    MangaAdded { id: i64, title: String },

    /// A manga was removed from the library
    MangaRemoved { id: i64 },

    /// The chapter list of a manga was replaced
    ChaptersUpdated { id: i64, count: usize },

    /// View settings changed
    SettingsUpdated,
}

impl AppState {
    /// Create new application state
    pub async fn new() -> Result<Self> {
        // Default to local storage in current directory
        let storage_path = std::env::var("MANGASHELF_STORAGE_PATH")
            .unwrap_or_else(|_| "./mangashelf_data".to_string());
        let storage_path = PathBuf::from(storage_path);

        tokio::fs::create_dir_all(&storage_path).await?;

        let store: Arc<dyn LibraryStore> =
            Arc::new(JsonFileStore::new(storage_path.join("library.json")));
        Self::with_store(store, storage_path).await
    }

    /// Create application state over an explicit store
    pub async fn with_store(store: Arc<dyn LibraryStore>, storage_path: PathBuf) -> Result<Self> {
        let library = match store.load().await {
            Ok(library) => library,
            Err(e) => {
                tracing::warn!("Failed to load library, starting fresh: {}", e);
                LibrarySnapshot::default()
            }
        };

        let settings_path = storage_path.join("settings.json");
        let settings = match load_json::<ServerSettings>(&settings_path).await {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Failed to load settings, using defaults: {}", e);
                ServerSettings::default()
            }
        };

        tracing::info!(mangas = library.len(), "Library ready");

        let (event_tx, _) = broadcast::channel(100);

        Ok(Self {
            store,
            storage_path,
            library: Arc::new(RwLock::new(library)),
            settings: Arc::new(RwLock::new(settings)),
            event_tx,
        })
    }

    /// Get path to the settings file
    pub fn settings_path(&self) -> PathBuf {
        self.storage_path.join("settings.json")
    }

    /// Persist the library.
    ///
    /// Callers pass the snapshot behind their write guard and keep holding it
    /// until a failed save has been rolled back.
    pub async fn save_library(&self, library: &LibrarySnapshot) -> Result<()> {
        self.store.save(library).await?;
        Ok(())
    }

    /// Persist the settings; same locking contract as `save_library`
    pub async fn save_settings(&self, settings: &ServerSettings) -> Result<()> {
        save_json(&self.settings_path(), settings).await?;
        Ok(())
    }

    /// Subscribe to server events
    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.event_tx.subscribe()
    }

    /// Broadcast an event
    pub fn broadcast(&self, event: ServerEvent) {
        // Ignore errors (no subscribers)
        let _ = self.event_tx.send(event);
    }
}
