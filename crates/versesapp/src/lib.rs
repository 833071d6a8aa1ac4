//! # versesapp
//!
//! A flat-file store for a retreat's groups, verses and the registrations
//! linking them, with transaction-like guarantees on top of four independent
//! JSON files.
//!
//! ## Architecture
//!
//! ```text
//! api.rs        VersesApi: one unit of work per call
//!   │
//! commands/     groups, verses, purposes, registrations (business rules)
//!   │
//! store/        VerseStore gate + UnitOfWork, StorageBackend (fs / memory)
//!   │
//! model.rs      records, verse `type` compatibility codec
//! ```
//!
//! Every operation, read or write, runs under the store's single gate, so no
//! caller can observe a group deleted while its registrations still exist.
//!
//! ## Quick Start
//!
//! ```no_run
//! # async fn demo() -> versesapp::error::Result<()> {
//! use versesapp::api::VersesApi;
//!
//! let api = VersesApi::open("App_Data").await?;
//! let group = api.add_group("Team A", "secret").await?;
//! let verse = api.add_verse("Psalm 23:1", "meal-use").await?;
//! let result = api.register_verse(group.id, verse.id).await?;
//! assert!(result.success);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod error;
pub mod model;
pub mod store;

#[cfg(test)]
pub mod test_utils;
