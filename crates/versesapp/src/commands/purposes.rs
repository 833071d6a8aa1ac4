use crate::error::Result;
use crate::store::{StorageBackend, UnitOfWork};
use tracing::info;

use super::helpers::non_blank;

/// All purposes in insertion order, seeding the defaults on first use.
pub async fn list<B: StorageBackend>(uow: &mut UnitOfWork<'_, B>) -> Result<Vec<String>> {
    uow.ensure_default_purposes().await
}

/// Appends `name` unless an entry already matches it case-insensitively.
/// Returns whether anything was added.
pub async fn add<B: StorageBackend>(uow: &mut UnitOfWork<'_, B>, name: &str) -> Result<bool> {
    let Some(name) = non_blank(name) else {
        return Ok(false);
    };

    let mut purposes = uow.ensure_default_purposes().await?;
    if purposes.iter().any(|p| same_purpose(p, name)) {
        return Ok(false);
    }

    purposes.push(name.to_string());
    uow.save_purposes(&purposes).await?;

    info!(purpose = name, "purpose added");
    Ok(true)
}

fn same_purpose(a: &str, b: &str) -> bool {
    a == b || a.to_uppercase() == b.to_uppercase()
}
