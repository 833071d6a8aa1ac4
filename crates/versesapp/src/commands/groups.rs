use crate::credentials::{hash_password, verify_password as matches_hash};
use crate::error::Result;
use crate::model::Group;
use crate::store::{StorageBackend, UnitOfWork};
use tracing::info;
use uuid::Uuid;

use super::helpers::{cascade_registrations, clear_registrations, id_set, non_blank, required};

pub async fn list<B: StorageBackend>(uow: &UnitOfWork<'_, B>) -> Result<Vec<Group>> {
    uow.groups().await
}

pub async fn add<B: StorageBackend>(
    uow: &mut UnitOfWork<'_, B>,
    name: &str,
    password: &str,
) -> Result<Group> {
    let name = required(name, "Group name")?;
    let password = required(password, "Group password")?;

    let mut groups = uow.groups().await?;
    let id = Uuid::new_v4();
    let group = Group {
        id,
        name: name.to_string(),
        password_hash: hash_password(id, password),
    };
    groups.push(group.clone());
    uow.save_groups(&groups).await?;

    info!(group_id = %group.id, "group added");
    Ok(group)
}

/// Renames a group and, if `password` is non-blank, replaces its hash.
/// Returns false for a blank name or an unknown id.
pub async fn update<B: StorageBackend>(
    uow: &mut UnitOfWork<'_, B>,
    id: Uuid,
    name: &str,
    password: Option<&str>,
) -> Result<bool> {
    let Some(name) = non_blank(name) else {
        return Ok(false);
    };

    let mut groups = uow.groups().await?;
    let Some(target) = groups.iter_mut().find(|g| g.id == id) else {
        return Ok(false);
    };

    target.name = name.to_string();
    if let Some(password) = password.and_then(non_blank) {
        target.password_hash = hash_password(target.id, password);
    }
    uow.save_groups(&groups).await?;

    info!(group_id = %id, "group updated");
    Ok(true)
}

pub async fn verify_password<B: StorageBackend>(
    uow: &UnitOfWork<'_, B>,
    id: Uuid,
    password: &str,
) -> Result<bool> {
    if non_blank(password).is_none() {
        return Ok(false);
    }

    let groups = uow.groups().await?;
    Ok(groups
        .iter()
        .find(|g| g.id == id)
        .is_some_and(|g| matches_hash(g.id, password, &g.password_hash)))
}

/// Deletes a group and every registration that references it.
pub async fn delete<B: StorageBackend>(uow: &mut UnitOfWork<'_, B>, id: Uuid) -> Result<bool> {
    let mut groups = uow.groups().await?;
    let Some(pos) = groups.iter().position(|g| g.id == id) else {
        return Ok(false);
    };

    groups.remove(pos);
    uow.save_groups(&groups).await?;
    let cascaded = cascade_registrations(uow, |r| r.group_id == id).await?;

    info!(group_id = %id, cascaded, "group deleted");
    Ok(true)
}

/// Deletes every group in `ids` plus their registrations. Returns the number
/// of groups removed; unknown ids are ignored.
pub async fn delete_many<B: StorageBackend>(
    uow: &mut UnitOfWork<'_, B>,
    ids: &[Uuid],
) -> Result<usize> {
    let ids = id_set(ids);
    if ids.is_empty() {
        return Ok(0);
    }

    let mut groups = uow.groups().await?;
    let before = groups.len();
    groups.retain(|g| !ids.contains(&g.id));
    let removed = before - groups.len();
    if removed == 0 {
        return Ok(0);
    }

    uow.save_groups(&groups).await?;
    let cascaded = cascade_registrations(uow, |r| ids.contains(&r.group_id)).await?;

    info!(removed, cascaded, "groups deleted");
    Ok(removed)
}

/// Empties the group collection and, with it, the registration collection.
pub async fn delete_all<B: StorageBackend>(uow: &mut UnitOfWork<'_, B>) -> Result<usize> {
    let count = uow.groups().await?.len();
    if count == 0 {
        return Ok(0);
    }

    uow.save_groups(&[]).await?;
    clear_registrations(uow).await?;

    info!(removed = count, "all groups deleted");
    Ok(count)
}
