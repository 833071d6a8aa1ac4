use super::backend::{decode_collection, encode_collection, Collection, StorageBackend};
use crate::error::{Result, VersesError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

/// Production backend: one pretty-printed JSON file per collection under `root`.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    /// Opens (and creates, if absent) the storage directory.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let backend = Self { root: root.into() };
        backend.ensure_dir().await?;
        Ok(backend)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn collection_path(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.file_name())
    }

    async fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(VersesError::Io)
    }
}

impl StorageBackend for FsBackend {
    async fn load<T>(&self, collection: Collection) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Send,
    {
        let path = self.collection_path(collection);
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(VersesError::Io(e)),
        };
        let records = decode_collection(&content)?;
        debug!(%collection, count = records.len(), "loaded collection");
        Ok(records)
    }

    async fn save<T>(&mut self, collection: Collection, records: &[T]) -> Result<()>
    where
        T: Serialize + Sync,
    {
        let content = encode_collection(records)?;
        self.ensure_dir().await?;

        let target = self.collection_path(collection);

        // Atomic write
        let tmp = self
            .root
            .join(format!(".{}-{}.tmp", collection.name(), Uuid::new_v4()));
        fs::write(&tmp, content).await.map_err(VersesError::Io)?;
        fs::rename(&tmp, &target).await.map_err(VersesError::Io)?;

        debug!(%collection, count = records.len(), "saved collection");
        Ok(())
    }
}
