use crate::error::Result;
use crate::model::Verse;
use crate::store::{StorageBackend, UnitOfWork};
use tracing::info;
use uuid::Uuid;

use super::helpers::{cascade_registrations, clear_registrations, id_set, non_blank, required};

pub async fn list<B: StorageBackend>(uow: &UnitOfWork<'_, B>) -> Result<Vec<Verse>> {
    uow.verses().await
}

/// Adds a verse. The purpose is any label; it is not checked against the
/// purpose collection, but that collection is seeded if still empty.
pub async fn add<B: StorageBackend>(
    uow: &mut UnitOfWork<'_, B>,
    text: &str,
    purpose: &str,
) -> Result<Verse> {
    let text = required(text, "Verse text")?;
    let purpose = required(purpose, "Verse type")?;

    uow.ensure_default_purposes().await?;
    let mut verses = uow.verses().await?;
    let verse = Verse {
        id: Uuid::new_v4(),
        text: text.to_string(),
        purpose: purpose.to_string(),
    };
    verses.push(verse.clone());
    uow.save_verses(&verses).await?;

    info!(verse_id = %verse.id, "verse added");
    Ok(verse)
}

pub async fn update<B: StorageBackend>(
    uow: &mut UnitOfWork<'_, B>,
    id: Uuid,
    text: &str,
    purpose: &str,
) -> Result<bool> {
    let (Some(text), Some(purpose)) = (non_blank(text), non_blank(purpose)) else {
        return Ok(false);
    };

    uow.ensure_default_purposes().await?;
    let mut verses = uow.verses().await?;
    let Some(target) = verses.iter_mut().find(|v| v.id == id) else {
        return Ok(false);
    };

    target.text = text.to_string();
    target.purpose = purpose.to_string();
    uow.save_verses(&verses).await?;

    info!(verse_id = %id, "verse updated");
    Ok(true)
}

/// Deletes a verse and every registration that references it.
pub async fn delete<B: StorageBackend>(uow: &mut UnitOfWork<'_, B>, id: Uuid) -> Result<bool> {
    let mut verses = uow.verses().await?;
    let Some(pos) = verses.iter().position(|v| v.id == id) else {
        return Ok(false);
    };

    verses.remove(pos);
    uow.save_verses(&verses).await?;
    let cascaded = cascade_registrations(uow, |r| r.verse_id == id).await?;

    info!(verse_id = %id, cascaded, "verse deleted");
    Ok(true)
}

pub async fn delete_many<B: StorageBackend>(
    uow: &mut UnitOfWork<'_, B>,
    ids: &[Uuid],
) -> Result<usize> {
    let ids = id_set(ids);
    if ids.is_empty() {
        return Ok(0);
    }

    let mut verses = uow.verses().await?;
    let before = verses.len();
    verses.retain(|v| !ids.contains(&v.id));
    let removed = before - verses.len();
    if removed == 0 {
        return Ok(0);
    }

    uow.save_verses(&verses).await?;
    let cascaded = cascade_registrations(uow, |r| ids.contains(&r.verse_id)).await?;

    info!(removed, cascaded, "verses deleted");
    Ok(removed)
}

pub async fn delete_all<B: StorageBackend>(uow: &mut UnitOfWork<'_, B>) -> Result<usize> {
    let count = uow.verses().await?.len();
    if count == 0 {
        return Ok(0);
    }

    uow.save_verses(&[]).await?;
    clear_registrations(uow).await?;

    info!(removed = count, "all verses deleted");
    Ok(count)
}
