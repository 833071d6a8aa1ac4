//! # Storage Layer
//!
//! This module owns the four collections (groups, verses, registrations,
//! purposes) and the single gate that serializes every access to them.
//!
//! ## Layout
//!
//! ```text
//! <data root>/
//! ├── groups.json          # Vec<Group>
//! ├── verses.json          # Vec<Verse>
//! ├── registrations.json   # Vec<Registration>
//! └── purposes.json        # Vec<String>
//! ```
//!
//! Each file holds the complete collection, pretty-printed with camelCase
//! field names. A missing file is an empty collection. Nothing here ever
//! deletes a file; clearing a collection writes `[]`.
//!
//! ## The Gate
//!
//! There is no multi-file transaction primitive on a plain directory, yet an
//! operation such as "delete group" must rewrite `groups.json` *and*
//! `registrations.json` without anyone observing the state in between.
//! [`VerseStore`] therefore keeps its backend behind one async mutex. Every
//! public operation, pure reads included, takes it through
//! [`VerseStore::begin`] and holds the resulting [`UnitOfWork`] until it is
//! done reading, deciding and writing. There is no reader/writer split and no
//! timeout on the wait.
//!
//! ## Unit of Work
//!
//! The command layer is written only against [`UnitOfWork`]: typed accessors
//! for each collection plus purpose seeding. Swapping the gate for a real
//! transactional store means reimplementing this type, not the commands.
//!
//! ## Known Limitation
//!
//! Each file write is atomic on its own (temp file + rename), but two writes
//! are not atomic together. If the second write of a cascade fails, the first
//! has already landed and the files disagree until fixed by hand.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: production, one JSON file per collection.
//! - [`mem_backend::MemBackend`]: for testing logic without filesystem I/O.

use crate::error::Result;
use crate::model::{default_purposes, Group, Registration, Verse};
use tokio::sync::{Mutex, MutexGuard};
use tracing::info;

pub mod backend;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;

pub use backend::{Collection, StorageBackend};

pub struct VerseStore<B: StorageBackend> {
    gate: Mutex<B>,
}

impl<B: StorageBackend> VerseStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            gate: Mutex::new(backend),
        }
    }

    /// Waits for the gate and opens a unit of work. The gate is released when
    /// the unit of work is dropped.
    pub async fn begin(&self) -> UnitOfWork<'_, B> {
        UnitOfWork {
            backend: self.gate.lock().await,
        }
    }

    pub fn into_backend(self) -> B {
        self.gate.into_inner()
    }
}

/// Exclusive access to every collection for the duration of one operation.
pub struct UnitOfWork<'a, B: StorageBackend> {
    backend: MutexGuard<'a, B>,
}

impl<B: StorageBackend> UnitOfWork<'_, B> {
    pub async fn groups(&self) -> Result<Vec<Group>> {
        self.backend.load(Collection::Groups).await
    }

    pub async fn save_groups(&mut self, groups: &[Group]) -> Result<()> {
        self.backend.save(Collection::Groups, groups).await
    }

    pub async fn verses(&self) -> Result<Vec<Verse>> {
        self.backend.load(Collection::Verses).await
    }

    pub async fn save_verses(&mut self, verses: &[Verse]) -> Result<()> {
        self.backend.save(Collection::Verses, verses).await
    }

    pub async fn registrations(&self) -> Result<Vec<Registration>> {
        self.backend.load(Collection::Registrations).await
    }

    pub async fn save_registrations(&mut self, registrations: &[Registration]) -> Result<()> {
        self.backend
            .save(Collection::Registrations, registrations)
            .await
    }

    /// Purposes as stored, without seeding.
    pub async fn purposes(&self) -> Result<Vec<String>> {
        self.backend.load(Collection::Purposes).await
    }

    pub async fn save_purposes(&mut self, purposes: &[String]) -> Result<()> {
        self.backend.save(Collection::Purposes, purposes).await
    }

    /// Seeds the default purposes if the collection is empty and persists
    /// them immediately, so the seed survives a restart. Returns the
    /// collection after seeding.
    pub async fn ensure_default_purposes(&mut self) -> Result<Vec<String>> {
        let purposes = self.purposes().await?;
        if !purposes.is_empty() {
            return Ok(purposes);
        }

        let defaults = default_purposes();
        self.save_purposes(&defaults).await?;
        info!(count = defaults.len(), "seeded default purposes");
        Ok(defaults)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
