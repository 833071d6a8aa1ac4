//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for callers (the admin CLI, a web front end, tests).
//!
//! ## Role and Responsibilities
//!
//! Each method:
//! - **Opens exactly one unit of work**, i.e. waits for the store's gate
//! - **Dispatches** to the matching command function
//! - **Returns structured types**: entities, `bool`/count signals, or an
//!   [`OperationResult`] for ledger transitions
//!
//! The gate is released when the method returns, so a caller can never hold
//! it across two calls.
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **Presentation**: Messages are data, not terminal output
//! - **Choosing a directory**: See [`crate::config`]
//!
//! ## Generic Over StorageBackend
//!
//! `VersesApi<B: StorageBackend>` is generic over the backend:
//! - Production: `VersesApi<FsBackend>`
//! - Testing: `VersesApi<MemBackend>`

use crate::commands::{groups, purposes, registrations, verses};
use crate::error::Result;
use crate::model::{Group, OperationResult, Registration, Verse};
use crate::store::fs::FileStore;
use crate::store::fs_backend::FsBackend;
use crate::store::{StorageBackend, VerseStore};
use std::path::PathBuf;
use uuid::Uuid;

/// The main API facade for store operations.
pub struct VersesApi<B: StorageBackend> {
    store: VerseStore<B>,
}

impl VersesApi<FsBackend> {
    /// Opens the file-backed store under `root`, creating the directory.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self::new(FileStore::open(root).await?))
    }
}

impl<B: StorageBackend> VersesApi<B> {
    pub fn new(store: VerseStore<B>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &VerseStore<B> {
        &self.store
    }

    // --- Groups ---

    pub async fn groups(&self) -> Result<Vec<Group>> {
        let uow = self.store.begin().await;
        groups::list(&uow).await
    }

    pub async fn add_group(&self, name: &str, password: &str) -> Result<Group> {
        let mut uow = self.store.begin().await;
        groups::add(&mut uow, name, password).await
    }

    pub async fn update_group(&self, id: Uuid, name: &str, password: Option<&str>) -> Result<bool> {
        let mut uow = self.store.begin().await;
        groups::update(&mut uow, id, name, password).await
    }

    pub async fn verify_group_password(&self, id: Uuid, password: &str) -> Result<bool> {
        let uow = self.store.begin().await;
        groups::verify_password(&uow, id, password).await
    }

    pub async fn delete_group(&self, id: Uuid) -> Result<bool> {
        let mut uow = self.store.begin().await;
        groups::delete(&mut uow, id).await
    }

    pub async fn delete_groups(&self, ids: &[Uuid]) -> Result<usize> {
        let mut uow = self.store.begin().await;
        groups::delete_many(&mut uow, ids).await
    }

    pub async fn delete_all_groups(&self) -> Result<usize> {
        let mut uow = self.store.begin().await;
        groups::delete_all(&mut uow).await
    }

    // --- Verses ---

    pub async fn verses(&self) -> Result<Vec<Verse>> {
        let uow = self.store.begin().await;
        verses::list(&uow).await
    }

    pub async fn add_verse(&self, text: &str, purpose: &str) -> Result<Verse> {
        let mut uow = self.store.begin().await;
        verses::add(&mut uow, text, purpose).await
    }

    pub async fn update_verse(&self, id: Uuid, text: &str, purpose: &str) -> Result<bool> {
        let mut uow = self.store.begin().await;
        verses::update(&mut uow, id, text, purpose).await
    }

    pub async fn delete_verse(&self, id: Uuid) -> Result<bool> {
        let mut uow = self.store.begin().await;
        verses::delete(&mut uow, id).await
    }

    pub async fn delete_verses(&self, ids: &[Uuid]) -> Result<usize> {
        let mut uow = self.store.begin().await;
        verses::delete_many(&mut uow, ids).await
    }

    pub async fn delete_all_verses(&self) -> Result<usize> {
        let mut uow = self.store.begin().await;
        verses::delete_all(&mut uow).await
    }

    // --- Purposes ---

    pub async fn purposes(&self) -> Result<Vec<String>> {
        let mut uow = self.store.begin().await;
        purposes::list(&mut uow).await
    }

    pub async fn add_purpose(&self, name: &str) -> Result<bool> {
        let mut uow = self.store.begin().await;
        purposes::add(&mut uow, name).await
    }

    // --- Registrations ---

    pub async fn registrations(&self) -> Result<Vec<Registration>> {
        let uow = self.store.begin().await;
        registrations::list(&uow).await
    }

    pub async fn registrations_for_group(&self, group_id: Uuid) -> Result<Vec<Registration>> {
        let uow = self.store.begin().await;
        registrations::list_for_group(&uow, group_id).await
    }

    pub async fn register_verse(&self, group_id: Uuid, verse_id: Uuid) -> Result<OperationResult> {
        let mut uow = self.store.begin().await;
        registrations::register(&mut uow, group_id, verse_id).await
    }

    pub async fn unregister_verse(
        &self,
        group_id: Uuid,
        verse_id: Uuid,
    ) -> Result<OperationResult> {
        let mut uow = self.store.begin().await;
        registrations::unregister(&mut uow, group_id, verse_id).await
    }

    pub async fn use_verse(&self, group_id: Uuid, verse_id: Uuid) -> Result<OperationResult> {
        let mut uow = self.store.begin().await;
        registrations::mark_used(&mut uow, group_id, verse_id).await
    }

    pub async fn recite_verse(&self, group_id: Uuid, verse_id: Uuid) -> Result<OperationResult> {
        let mut uow = self.store.begin().await;
        registrations::mark_recited(&mut uow, group_id, verse_id).await
    }

    pub async fn reset_verse_status(
        &self,
        group_id: Uuid,
        verse_id: Uuid,
    ) -> Result<OperationResult> {
        let mut uow = self.store.begin().await;
        registrations::reset_status(&mut uow, group_id, verse_id).await
    }
}
