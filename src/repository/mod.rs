//! Repository layer over the persistent key-value store

pub mod backend;
pub mod equipment;
pub mod logs;
pub mod settings;
pub mod users;

use serde::{de::DeserializeOwned, Serialize};
use snowflaked::sync::Generator;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

use crate::{
    config::{StorageBackendKind, StorageConfig},
    error::AppResult,
};

pub use backend::{FileBackend, MemoryBackend, StorageBackend};

static ID_GENERATOR: Generator = Generator::new(0);

/// Fresh unique identifier for equipment, logs, categories and undo tickets
pub fn next_id() -> u64 {
    ID_GENERATOR.generate()
}

/// The four persisted collections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Users,
    Equipment,
    Logs,
    Settings,
}

impl Collection {
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Equipment => "equipment",
            Collection::Logs => "logs",
            Collection::Settings => "settings",
        }
    }
}

/// Main repository struct holding the storage backend
///
/// There are no transactions across collections. Multi-step operations hold
/// [`Repository::lock`] so that they do not interleave within this process,
/// but another process sharing the same data directory can still race.
#[derive(Clone)]
pub struct Repository {
    backend: Arc<dyn StorageBackend>,
    write_lock: Arc<Mutex<()>>,
}

impl Repository {
    /// Create a new repository over the given backend
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Repository backed by memory only
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// Build the backend selected by configuration
    pub async fn from_config(config: &StorageConfig) -> AppResult<Self> {
        let backend: Arc<dyn StorageBackend> = match config.backend {
            StorageBackendKind::File => Arc::new(FileBackend::open(&config.data_dir).await?),
            StorageBackendKind::Memory => Arc::new(MemoryBackend::new()),
        };
        Ok(Self::new(backend))
    }

    /// Serialize read-modify-write sequences within this process
    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Read a collection, falling back to `default` when it is absent or unreadable
    pub async fn read_or<T: DeserializeOwned>(&self, collection: Collection, default: T) -> T {
        let key = collection.key();
        match self.backend.get(key).await {
            Ok(Some(text)) => match serde_json::from_str(&text) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!("Corrupt {} document, using default: {}", key, e);
                    default
                }
            },
            Ok(None) => {
                tracing::debug!("No {} document yet, using default", key);
                default
            }
            Err(e) => {
                tracing::warn!("Failed to read {} document, using default: {}", key, e);
                default
            }
        }
    }

    /// Replace a collection document
    pub async fn write<T: Serialize + ?Sized>(
        &self,
        collection: Collection,
        value: &T,
    ) -> AppResult<()> {
        let text = serde_json::to_string(value)?;
        self.backend.set(collection.key(), text).await
    }

    /// Whether a collection has ever been written
    pub async fn exists(&self, collection: Collection) -> AppResult<bool> {
        Ok(self.backend.get(collection.key()).await?.is_some())
    }

    /// Raw document text, for tests and diagnostics
    pub async fn raw(&self, collection: Collection) -> AppResult<Option<String>> {
        self.backend.get(collection.key()).await
    }

    /// Overwrite a document with raw text, bypassing serialization
    pub async fn write_raw(&self, collection: Collection, text: &str) -> AppResult<()> {
        self.backend.set(collection.key(), text.to_string()).await
    }
}
