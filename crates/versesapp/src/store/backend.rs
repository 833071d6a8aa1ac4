use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::future::Future;

/// The four named collections, one backing file each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Groups,
    Verses,
    Registrations,
    Purposes,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Groups,
        Collection::Verses,
        Collection::Registrations,
        Collection::Purposes,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Collection::Groups => "groups.json",
            Collection::Verses => "verses.json",
            Collection::Registrations => "registrations.json",
            Collection::Purposes => "purposes.json",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Collection::Groups => "groups",
            Collection::Verses => "verses",
            Collection::Registrations => "registrations",
            Collection::Purposes => "purposes",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Abstract interface for raw collection I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while `VerseStore` and the command layer handle the "what".
///
/// Backends are only ever reached through the store's gate, so `save`
/// takes `&mut self` and implementations need no locking of their own.
pub trait StorageBackend: Send {
    /// Load a whole collection in stored order.
    /// Returns an empty vec if the collection has never been written.
    /// Returns Err on I/O failure or unparsable contents.
    fn load<T>(&self, collection: Collection) -> impl Future<Output = Result<Vec<T>>> + Send
    where
        T: DeserializeOwned + Send;

    /// Replace a collection's entire contents with `records`.
    /// Writers always pass the complete in-memory collection.
    fn save<T>(
        &mut self,
        collection: Collection,
        records: &[T],
    ) -> impl Future<Output = Result<()>> + Send
    where
        T: Serialize + Sync;
}

/// Parses a serialized collection. A literal `null` reads as empty.
pub(crate) fn decode_collection<T: DeserializeOwned>(content: &str) -> Result<Vec<T>> {
    let records: Option<Vec<T>> = serde_json::from_str(content)?;
    Ok(records.unwrap_or_default())
}

/// Pretty-printed, field-named encoding so files stay diffable and hand-editable.
pub(crate) fn encode_collection<T: Serialize>(records: &[T]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}
