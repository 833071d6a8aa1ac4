//! The registration ledger.
//!
//! Each (group, verse) pair has at most one [`Registration`]. Its status
//! moves Registered → Used or Registered → Recited and back to Registered
//! only through [`reset_status`]. Every transition reports an
//! [`OperationResult`]; rule violations are never errors.

use crate::error::Result;
use crate::model::{OperationResult, Registration, RegistrationStatus};
use crate::store::{StorageBackend, UnitOfWork};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use super::RuleViolation;

pub async fn list<B: StorageBackend>(uow: &UnitOfWork<'_, B>) -> Result<Vec<Registration>> {
    uow.registrations().await
}

pub async fn list_for_group<B: StorageBackend>(
    uow: &UnitOfWork<'_, B>,
    group_id: Uuid,
) -> Result<Vec<Registration>> {
    let mut registrations = uow.registrations().await?;
    registrations.retain(|r| r.group_id == group_id);
    Ok(registrations)
}

pub async fn register<B: StorageBackend>(
    uow: &mut UnitOfWork<'_, B>,
    group_id: Uuid,
    verse_id: Uuid,
) -> Result<OperationResult> {
    if !uow.groups().await?.iter().any(|g| g.id == group_id) {
        return Ok(RuleViolation::GroupNotFound.into());
    }
    if !uow.verses().await?.iter().any(|v| v.id == verse_id) {
        return Ok(RuleViolation::VerseNotFound.into());
    }

    let mut registrations = uow.registrations().await?;
    if registrations.iter().any(|r| r.matches(group_id, verse_id)) {
        return Ok(RuleViolation::AlreadyRegistered.into());
    }

    registrations.push(Registration::new(group_id, verse_id));
    uow.save_registrations(&registrations).await?;

    info!(%group_id, %verse_id, "verse registered");
    Ok(OperationResult::ok("Verse registered."))
}

/// Removes a registration whatever its status.
pub async fn unregister<B: StorageBackend>(
    uow: &mut UnitOfWork<'_, B>,
    group_id: Uuid,
    verse_id: Uuid,
) -> Result<OperationResult> {
    let mut registrations = uow.registrations().await?;
    let Some(pos) = registrations
        .iter()
        .position(|r| r.matches(group_id, verse_id))
    else {
        return Ok(RuleViolation::RegistrationNotFound.into());
    };

    registrations.remove(pos);
    uow.save_registrations(&registrations).await?;

    info!(%group_id, %verse_id, "verse unregistered");
    Ok(OperationResult::ok("Verse unregistered."))
}

pub async fn mark_used<B: StorageBackend>(
    uow: &mut UnitOfWork<'_, B>,
    group_id: Uuid,
    verse_id: Uuid,
) -> Result<OperationResult> {
    transition(uow, group_id, verse_id, Transition::Use).await
}

pub async fn mark_recited<B: StorageBackend>(
    uow: &mut UnitOfWork<'_, B>,
    group_id: Uuid,
    verse_id: Uuid,
) -> Result<OperationResult> {
    transition(uow, group_id, verse_id, Transition::Recite).await
}

pub async fn reset_status<B: StorageBackend>(
    uow: &mut UnitOfWork<'_, B>,
    group_id: Uuid,
    verse_id: Uuid,
) -> Result<OperationResult> {
    transition(uow, group_id, verse_id, Transition::Reset).await
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Use,
    Recite,
    Reset,
}

impl Transition {
    /// Checks the guard and applies the transition to `registration`.
    fn apply(
        self,
        registration: &mut Registration,
    ) -> std::result::Result<&'static str, RuleViolation> {
        let status = registration.status();
        match self {
            Transition::Use | Transition::Recite => match status {
                RegistrationStatus::Used => return Err(RuleViolation::AlreadyUsed),
                RegistrationStatus::Recited => return Err(RuleViolation::AlreadyRecited),
                RegistrationStatus::Registered => {}
            },
            Transition::Reset => {
                if status == RegistrationStatus::Registered {
                    return Err(RuleViolation::NothingToReset);
                }
            }
        }

        let now = Utc::now();
        Ok(match self {
            Transition::Use => {
                registration.used_at = Some(now);
                "Verse marked as used."
            }
            Transition::Recite => {
                registration.recited_at = Some(now);
                "Verse marked as recited."
            }
            Transition::Reset => {
                registration.used_at = None;
                registration.recited_at = None;
                "Status reset."
            }
        })
    }
}

async fn transition<B: StorageBackend>(
    uow: &mut UnitOfWork<'_, B>,
    group_id: Uuid,
    verse_id: Uuid,
    step: Transition,
) -> Result<OperationResult> {
    let mut registrations = uow.registrations().await?;
    let Some(target) = registrations
        .iter_mut()
        .find(|r| r.matches(group_id, verse_id))
    else {
        return Ok(RuleViolation::RegistrationNotFound.into());
    };

    let message = match step.apply(target) {
        Ok(message) => message,
        Err(violation) => return Ok(violation.into()),
    };
    uow.save_registrations(&registrations).await?;

    info!(%group_id, %verse_id, ?step, "registration status changed");
    Ok(OperationResult::ok(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MEAL_PURPOSE;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::Collection;

    fn fixture() -> StoreFixture {
        StoreFixture::new()
            .with_group("A", "pw")
            .with_group("B", "pw")
            .with_verse("Ps 23", MEAL_PURPOSE)
            .with_verse("Jn 3:16", MEAL_PURPOSE)
    }

    fn failed(violation: RuleViolation) -> OperationResult {
        violation.into()
    }

    #[tokio::test]
    async fn register_creates_registered_record() {
        let fx = fixture();
        let store = fx.build();
        let mut uow = store.begin().await;

        let result = register(&mut uow, fx.group_id(0), fx.verse_id(0)).await.unwrap();
        assert!(result.success);

        let regs = list(&uow).await.unwrap();
        assert_eq!(regs.len(), 1);
        assert_eq!(regs[0].status(), RegistrationStatus::Registered);
        assert_eq!(regs[0].group_id, fx.group_id(0));
        assert_eq!(regs[0].verse_id, fx.verse_id(0));
    }

    #[tokio::test]
    async fn register_requires_existing_group_and_verse() {
        let fx = fixture();
        let store = fx.build();
        let mut uow = store.begin().await;

        let result = register(&mut uow, Uuid::new_v4(), fx.verse_id(0)).await.unwrap();
        assert_eq!(result, failed(RuleViolation::GroupNotFound));

        let result = register(&mut uow, fx.group_id(0), Uuid::new_v4()).await.unwrap();
        assert_eq!(result, failed(RuleViolation::VerseNotFound));

        // Group check wins when both are missing.
        let result = register(&mut uow, Uuid::new_v4(), Uuid::new_v4()).await.unwrap();
        assert_eq!(result, failed(RuleViolation::GroupNotFound));

        assert!(uow.backend().writes().is_empty());
    }

    #[tokio::test]
    async fn register_twice_is_rejected() {
        let fx = fixture();
        let store = fx.build();
        let mut uow = store.begin().await;

        assert!(register(&mut uow, fx.group_id(0), fx.verse_id(0)).await.unwrap().success);
        let second = register(&mut uow, fx.group_id(0), fx.verse_id(0)).await.unwrap();
        assert_eq!(second, failed(RuleViolation::AlreadyRegistered));

        let regs = list(&uow).await.unwrap();
        assert_eq!(
            regs.iter()
                .filter(|r| r.matches(fx.group_id(0), fx.verse_id(0)))
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn same_verse_for_different_groups() {
        let fx = fixture();
        let store = fx.build();
        let mut uow = store.begin().await;

        assert!(register(&mut uow, fx.group_id(0), fx.verse_id(0)).await.unwrap().success);
        assert!(register(&mut uow, fx.group_id(1), fx.verse_id(0)).await.unwrap().success);
        assert!(register(&mut uow, fx.group_id(0), fx.verse_id(1)).await.unwrap().success);

        assert_eq!(list_for_group(&uow, fx.group_id(0)).await.unwrap().len(), 2);
        assert_eq!(list_for_group(&uow, fx.group_id(1)).await.unwrap().len(), 1);
        assert!(list_for_group(&uow, Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn status_machine_walk() {
        let fx = fixture().with_registration(0, 0);
        let store = fx.build();
        let mut uow = store.begin().await;
        let (g, v) = (fx.group_id(0), fx.verse_id(0));

        assert!(mark_used(&mut uow, g, v).await.unwrap().success);
        assert_eq!(list(&uow).await.unwrap()[0].status(), RegistrationStatus::Used);

        assert_eq!(
            mark_used(&mut uow, g, v).await.unwrap(),
            failed(RuleViolation::AlreadyUsed)
        );
        assert_eq!(
            mark_recited(&mut uow, g, v).await.unwrap(),
            failed(RuleViolation::AlreadyUsed)
        );

        assert!(reset_status(&mut uow, g, v).await.unwrap().success);
        assert_eq!(
            list(&uow).await.unwrap()[0].status(),
            RegistrationStatus::Registered
        );

        assert!(mark_recited(&mut uow, g, v).await.unwrap().success);
        assert_eq!(
            list(&uow).await.unwrap()[0].status(),
            RegistrationStatus::Recited
        );
        assert_eq!(
            mark_used(&mut uow, g, v).await.unwrap(),
            failed(RuleViolation::AlreadyRecited)
        );
        assert_eq!(
            mark_recited(&mut uow, g, v).await.unwrap(),
            failed(RuleViolation::AlreadyRecited)
        );

        assert!(reset_status(&mut uow, g, v).await.unwrap().success);
        assert_eq!(
            reset_status(&mut uow, g, v).await.unwrap(),
            failed(RuleViolation::NothingToReset)
        );

        let reg = &list(&uow).await.unwrap()[0];
        assert_eq!(reg.used_at, None);
        assert_eq!(reg.recited_at, None);
    }

    #[tokio::test]
    async fn transitions_keep_registered_at() {
        let fx = fixture().with_registration(0, 0);
        let store = fx.build();
        let mut uow = store.begin().await;
        let (g, v) = (fx.group_id(0), fx.verse_id(0));
        let registered_at = list(&uow).await.unwrap()[0].registered_at;

        mark_used(&mut uow, g, v).await.unwrap();
        reset_status(&mut uow, g, v).await.unwrap();
        assert_eq!(list(&uow).await.unwrap()[0].registered_at, registered_at);
    }

    #[tokio::test]
    async fn transitions_on_missing_registration() {
        let fx = fixture();
        let store = fx.build();
        let mut uow = store.begin().await;
        let (g, v) = (fx.group_id(0), fx.verse_id(0));

        let not_found = failed(RuleViolation::RegistrationNotFound);
        assert_eq!(mark_used(&mut uow, g, v).await.unwrap(), not_found);
        assert_eq!(mark_recited(&mut uow, g, v).await.unwrap(), not_found);
        assert_eq!(reset_status(&mut uow, g, v).await.unwrap(), not_found);
        assert_eq!(unregister(&mut uow, g, v).await.unwrap(), not_found);
        assert!(uow.backend().writes().is_empty());
    }

    #[tokio::test]
    async fn unregister_ignores_status() {
        let fx = fixture().with_registration(0, 0).with_registration(1, 0);
        let store = fx.build();
        let mut uow = store.begin().await;
        let (g, v) = (fx.group_id(0), fx.verse_id(0));

        mark_recited(&mut uow, g, v).await.unwrap();
        assert!(unregister(&mut uow, g, v).await.unwrap().success);

        let regs = list(&uow).await.unwrap();
        assert_eq!(regs.len(), 1);
        assert_eq!(regs[0].group_id, fx.group_id(1));
        assert_eq!(
            uow.backend().writes().last(),
            Some(&Collection::Registrations)
        );
    }

    #[test]
    fn messages_are_human_readable() {
        assert_eq!(RuleViolation::AlreadyUsed.to_string(), "Verse has already been used.");
        assert_eq!(RuleViolation::NothingToReset.to_string(), "Nothing to reset.");
        let result: OperationResult = RuleViolation::AlreadyRegistered.into();
        assert!(!result.success);
        assert_eq!(result.message, "Verse is already registered.");
    }
}
