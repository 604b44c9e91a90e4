//! Key-value storage backends holding one text document per collection

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;

use crate::error::AppResult;

/// Durable text storage keyed by collection name
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Raw document text, `None` when the key was never written
    async fn get(&self, key: &str) -> AppResult<Option<String>>;
    /// Replace the document stored under `key`
    async fn set(&self, key: &str, value: String) -> AppResult<()>;
}

/// One `<key>.json` file per collection inside a data directory
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Open (and create if needed) the data directory
    pub async fn open(root: impl Into<PathBuf>) -> AppResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

#[async_trait]
impl StorageBackend for FileBackend {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: String) -> AppResult<()> {
        // Write beside the target then rename, so a document is never half-written
        let target = self.path_for(key);
        let tmp = self
            .root
            .join(format!("{}.{}.tmp", key, uuid::Uuid::new_v4().simple()));
        fs::write(&tmp, value.as_bytes()).await?;
        if let Err(e) = fs::rename(&tmp, &target).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }
}

/// Ephemeral backend for tests and throwaway runs
#[derive(Default)]
pub struct MemoryBackend {
    documents: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.documents.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> AppResult<()> {
        self.documents.write().await.insert(key.to_string(), value);
        Ok(())
    }
}
