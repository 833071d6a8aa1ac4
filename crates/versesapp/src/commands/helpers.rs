use crate::error::{Result, VersesError};
use crate::model::Registration;
use crate::store::{StorageBackend, UnitOfWork};
use std::collections::HashSet;
use tracing::warn;
use uuid::Uuid;

/// Trimmed `value`, or `InvalidArgument` naming `field` if it is blank.
pub fn required<'a>(value: &'a str, field: &str) -> Result<&'a str> {
    non_blank(value)
        .ok_or_else(|| VersesError::InvalidArgument(format!("{} is required.", field)))
}

/// Trimmed `value`, or `None` if it is blank.
pub fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Removes every registration matching `orphaned` and rewrites the
/// collection. Always called after the owning collection was written, inside
/// the same unit of work. Returns how many registrations went away.
pub async fn cascade_registrations<B, F>(uow: &mut UnitOfWork<'_, B>, orphaned: F) -> Result<usize>
where
    B: StorageBackend,
    F: Fn(&Registration) -> bool,
{
    let mut registrations = uow.registrations().await?;
    let before = registrations.len();
    registrations.retain(|r| !orphaned(r));
    let removed = before - registrations.len();

    if let Err(e) = uow.save_registrations(&registrations).await {
        warn!(error = %e, "registration cascade failed after owner was written");
        return Err(e);
    }
    Ok(removed)
}

/// Clears the registration collection after a delete-all of an owner.
pub async fn clear_registrations<B: StorageBackend>(uow: &mut UnitOfWork<'_, B>) -> Result<()> {
    if let Err(e) = uow.save_registrations(&[]).await {
        warn!(error = %e, "clearing registrations failed after owner was cleared");
        return Err(e);
    }
    Ok(())
}

pub fn id_set(ids: &[Uuid]) -> HashSet<Uuid> {
    ids.iter().copied().collect()
}
