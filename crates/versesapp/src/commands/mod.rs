//! # Command Layer
//!
//! This module contains the **core business logic**. Each collection has its
//! own submodule of plain async functions that operate on a
//! [`UnitOfWork`](crate::store::UnitOfWork), which the caller has already
//! opened. A command never opens a second unit of work, so everything it
//! reads, decides and writes happens under one gate acquisition.
//!
//! ## Outcomes
//!
//! Commands distinguish four kinds of result:
//! - **Invalid argument**: blank required text on a create call is
//!   `Err(VersesError::InvalidArgument)`.
//! - **Not applied**: update/delete of an unknown id, or blank text on update,
//!   is `Ok(false)` / `Ok(0)`.
//! - **Business rule**: ledger violations are `Ok(OperationResult)` with
//!   `success == false` and a [`RuleViolation`] message.
//! - **Storage failure**: I/O or parse errors propagate as `Err`.
//!
//! ## Testing Strategy
//!
//! **This is where the lion's share of testing lives.** Command tests run
//! against `InMemoryStore` and check both the returned value and what ended up
//! in each collection.
//!
//! ## Command Modules
//!
//! - [`groups`]: Group CRUD, password verification, cascading deletes
//! - [`verses`]: Verse CRUD, cascading deletes
//! - [`purposes`]: Purpose listing (with seeding) and add-if-absent
//! - [`registrations`]: The registration ledger and its status machine
//! - [`helpers`]: Shared input normalization and cascade helpers

use thiserror::Error;

pub mod groups;
pub mod helpers;
pub mod purposes;
pub mod registrations;
pub mod verses;

/// Expected ledger failures. The `Display` text is what callers show to users.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleViolation {
    #[error("Group not found.")]
    GroupNotFound,

    #[error("Verse not found.")]
    VerseNotFound,

    #[error("Verse is already registered.")]
    AlreadyRegistered,

    #[error("Registered verse not found.")]
    RegistrationNotFound,

    #[error("Verse has already been used.")]
    AlreadyUsed,

    #[error("Verse has already been recited.")]
    AlreadyRecited,

    #[error("Nothing to reset.")]
    NothingToReset,
}

impl From<RuleViolation> for crate::model::OperationResult {
    fn from(violation: RuleViolation) -> Self {
        crate::model::OperationResult::failed(violation.to_string())
    }
}
