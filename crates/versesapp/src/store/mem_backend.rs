use super::backend::{decode_collection, encode_collection, Collection, StorageBackend};
use crate::error::{Result, VersesError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Keeps each collection as its serialized JSON text so records go through
/// the same encoding as on disk, legacy shapes included.
#[derive(Debug, Default)]
pub struct MemBackend {
    files: HashMap<Collection, String>,
    writes: Vec<Collection>,
    simulate_write_error: Option<Collection>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection with raw JSON, bypassing the encoder.
    pub fn with_raw(mut self, collection: Collection, json: &str) -> Self {
        self.files.insert(collection, json.to_string());
        self
    }

    /// Raw contents of a collection, `None` if it was never written.
    pub fn raw(&self, collection: Collection) -> Option<&str> {
        self.files.get(&collection).map(String::as_str)
    }

    /// Every successful write, in order.
    pub fn writes(&self) -> &[Collection] {
        &self.writes
    }

    /// Make writes to `collection` fail, for error-handling tests.
    pub fn set_simulate_write_error(&mut self, collection: Option<Collection>) {
        self.simulate_write_error = collection;
    }
}

impl StorageBackend for MemBackend {
    async fn load<T>(&self, collection: Collection) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Send,
    {
        match self.files.get(&collection) {
            Some(content) => decode_collection(content),
            None => Ok(Vec::new()),
        }
    }

    async fn save<T>(&mut self, collection: Collection, records: &[T]) -> Result<()>
    where
        T: Serialize + Sync,
    {
        if self.simulate_write_error == Some(collection) {
            return Err(VersesError::Store(format!(
                "Simulated write error on {}",
                collection
            )));
        }
        let content = encode_collection(records)?;
        self.files.insert(collection, content);
        self.writes.push(collection);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_collection_is_empty() {
        let backend = MemBackend::new();
        let groups: Vec<String> = backend.load(Collection::Groups).await.unwrap();
        assert!(groups.is_empty());
        assert!(backend.raw(Collection::Groups).is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let mut backend = MemBackend::new();
        let items = vec!["one".to_string(), "two".to_string()];
        backend.save(Collection::Purposes, &items).await.unwrap();

        let loaded: Vec<String> = backend.load(Collection::Purposes).await.unwrap();
        assert_eq!(loaded, items);
        assert_eq!(backend.writes(), &[Collection::Purposes]);
    }

    #[tokio::test]
    async fn test_simulated_write_error() {
        let mut backend = MemBackend::new();
        backend.set_simulate_write_error(Some(Collection::Registrations));

        let items: Vec<String> = Vec::new();
        assert!(backend.save(Collection::Groups, &items).await.is_ok());
        let err = backend.save(Collection::Registrations, &items).await;
        assert!(matches!(err, Err(VersesError::Store(_))));
        assert_eq!(backend.writes(), &[Collection::Groups]);
    }

    #[tokio::test]
    async fn test_corrupt_raw_is_error() {
        let backend = MemBackend::new().with_raw(Collection::Groups, "[{");
        let loaded: Result<Vec<String>> = backend.load(Collection::Groups).await;
        assert!(matches!(loaded, Err(VersesError::Serialization(_))));
    }
}
