use std::collections::HashSet;
use std::sync::Arc;
use tempfile::TempDir;
use versesapp::api::VersesApi;
use versesapp::error::VersesError;
use versesapp::model::{RegistrationStatus, MEAL_PURPOSE};
use versesapp::store::fs_backend::FsBackend;

async fn open_api() -> (TempDir, Arc<VersesApi<FsBackend>>) {
    let dir = TempDir::new().unwrap();
    let api = VersesApi::open(dir.path().join("App_Data")).await.unwrap();
    (dir, Arc::new(api))
}

#[tokio::test]
async fn password_verifies_only_exact_match() {
    let (_dir, api) = open_api().await;
    for password in ["pw", "longer passphrase", "  padded  "] {
        let group = api.add_group("Team", password).await.unwrap();
        assert!(api.verify_group_password(group.id, password).await.unwrap());
        let wrong = format!("{}x", password);
        assert!(!api.verify_group_password(group.id, &wrong).await.unwrap());
    }
}

#[tokio::test]
async fn deleting_group_leaves_no_registration_behind() {
    let (_dir, api) = open_api().await;
    let doomed = api.add_group("Doomed", "pw").await.unwrap();
    let kept = api.add_group("Kept", "pw").await.unwrap();
    for text in ["Ps 23", "Jn 3:16", "Rom 8:28"] {
        let verse = api.add_verse(text, MEAL_PURPOSE).await.unwrap();
        api.register_verse(doomed.id, verse.id).await.unwrap();
        api.register_verse(kept.id, verse.id).await.unwrap();
    }

    assert!(api.delete_group(doomed.id).await.unwrap());

    let regs = api.registrations().await.unwrap();
    assert_eq!(regs.len(), 3);
    assert!(regs.iter().all(|r| r.group_id != doomed.id));
    assert!(!api.delete_group(doomed.id).await.unwrap());
}

#[tokio::test]
async fn deleting_verse_removes_exactly_its_registrations() {
    let (_dir, api) = open_api().await;
    let verse = api.add_verse("Ps 23", MEAL_PURPOSE).await.unwrap();
    let other = api.add_verse("Jn 3:16", MEAL_PURPOSE).await.unwrap();
    for i in 0..4 {
        let group = api.add_group(&format!("Team {}", i), "pw").await.unwrap();
        api.register_verse(group.id, verse.id).await.unwrap();
        api.register_verse(group.id, other.id).await.unwrap();
    }
    assert_eq!(api.registrations().await.unwrap().len(), 8);

    assert!(api.delete_verse(verse.id).await.unwrap());
    assert_eq!(api.registrations().await.unwrap().len(), 4);

    let before_groups = api.groups().await.unwrap();
    let before_verses = api.verses().await.unwrap();
    let before_regs = api.registrations().await.unwrap();
    assert!(!api.delete_verse(uuid::Uuid::new_v4()).await.unwrap());
    assert_eq!(api.groups().await.unwrap(), before_groups);
    assert_eq!(api.verses().await.unwrap(), before_verses);
    assert_eq!(api.registrations().await.unwrap(), before_regs);
}

#[tokio::test]
async fn registering_twice_keeps_one_record() {
    let (_dir, api) = open_api().await;
    let group = api.add_group("Team", "pw").await.unwrap();
    let verse = api.add_verse("Ps 23", MEAL_PURPOSE).await.unwrap();

    assert!(api.register_verse(group.id, verse.id).await.unwrap().success);
    let second = api.register_verse(group.id, verse.id).await.unwrap();
    assert!(!second.success);
    assert_eq!(second.message, "Verse is already registered.");
    assert_eq!(api.registrations_for_group(group.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn status_machine_round_trip_on_disk() {
    let (_dir, api) = open_api().await;
    let group = api.add_group("Team", "pw").await.unwrap();
    let verse = api.add_verse("Ps 23", MEAL_PURPOSE).await.unwrap();
    let (g, v) = (group.id, verse.id);
    api.register_verse(g, v).await.unwrap();

    let status = |api: Arc<VersesApi<FsBackend>>| async move {
        api.registrations().await.unwrap()[0].status()
    };

    assert!(api.use_verse(g, v).await.unwrap().success);
    assert_eq!(status(api.clone()).await, RegistrationStatus::Used);
    assert_eq!(
        api.use_verse(g, v).await.unwrap().message,
        "Verse has already been used."
    );

    assert!(api.reset_verse_status(g, v).await.unwrap().success);
    assert!(api.recite_verse(g, v).await.unwrap().success);
    assert_eq!(status(api.clone()).await, RegistrationStatus::Recited);
    assert!(api.reset_verse_status(g, v).await.unwrap().success);

    let nothing = api.reset_verse_status(g, v).await.unwrap();
    assert!(!nothing.success);
    assert_eq!(nothing.message, "Nothing to reset.");
    assert_eq!(status(api.clone()).await, RegistrationStatus::Registered);
}

#[tokio::test]
async fn invalid_argument_is_a_hard_error() {
    let (_dir, api) = open_api().await;
    assert!(matches!(
        api.add_group(" ", "pw").await,
        Err(VersesError::InvalidArgument(_))
    ));
    assert!(matches!(
        api.add_verse("Ps 23", "").await,
        Err(VersesError::InvalidArgument(_))
    ));
    assert!(!api.update_group(uuid::Uuid::new_v4(), "Name", None).await.unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_adds_are_not_lost() {
    let (_dir, api) = open_api().await;

    let mut handles = Vec::new();
    for i in 0..24 {
        let api = api.clone();
        handles.push(tokio::spawn(async move {
            api.add_group(&format!("Team {}", i), "pw").await.unwrap().id
        }));
    }
    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap());
    }

    let stored: HashSet<_> = api.groups().await.unwrap().iter().map(|g| g.id).collect();
    assert_eq!(stored, ids);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_duplicates_resolve_to_one_winner() {
    let (_dir, api) = open_api().await;
    let group = api.add_group("Team", "pw").await.unwrap();
    let verse = api.add_verse("Ps 23", MEAL_PURPOSE).await.unwrap();
    let (g, v) = (group.id, verse.id);

    let mut handles = Vec::new();
    for i in 0..16 {
        let api = api.clone();
        handles.push(tokio::spawn(async move {
            if i % 2 == 0 {
                api.register_verse(g, v).await.unwrap().success
            } else {
                api.add_purpose("Evening").await.unwrap()
            }
        }));
    }
    let mut wins = 0;
    for handle in handles {
        if handle.await.unwrap() {
            wins += 1;
        }
    }

    // One registration and one purpose insertion succeed, nothing else.
    assert_eq!(wins, 2);
    assert_eq!(api.registrations().await.unwrap().len(), 1);
    assert_eq!(api.purposes().await.unwrap().len(), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn delete_racing_register_never_orphans() {
    for _ in 0..10 {
        let (_dir, api) = open_api().await;
        let group = api.add_group("Team", "pw").await.unwrap();
        let verse = api.add_verse("Ps 23", MEAL_PURPOSE).await.unwrap();
        let (g, v) = (group.id, verse.id);

        let registering = {
            let api = api.clone();
            tokio::spawn(async move { api.register_verse(g, v).await.unwrap() })
        };
        let deleting = {
            let api = api.clone();
            tokio::spawn(async move { api.delete_group(g).await.unwrap() })
        };
        let registered = registering.await.unwrap();
        assert!(deleting.await.unwrap());

        // Either order is fine; a dangling registration is not.
        assert!(api.registrations().await.unwrap().is_empty());
        if !registered.success {
            assert_eq!(registered.message, "Group not found.");
        }
    }
}
