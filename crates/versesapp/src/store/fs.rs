use super::fs_backend::FsBackend;
use super::VerseStore;
use crate::error::Result;
use std::path::PathBuf;

pub type FileStore = VerseStore<FsBackend>;

impl FileStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        Ok(VerseStore::with_backend(FsBackend::open(root).await?))
    }
}
