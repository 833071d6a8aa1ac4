use super::mem_backend::MemBackend;
use super::VerseStore;

pub type InMemoryStore = VerseStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        VerseStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::credentials::hash_password;
    use crate::model::{Group, Registration, Verse};
    use crate::store::Collection;
    use uuid::Uuid;

    /// A store pre-populated through the raw backend, so fixtures never go
    /// through the command layer they are used to test.
    pub struct StoreFixture {
        pub groups: Vec<Group>,
        pub verses: Vec<Verse>,
        pub registrations: Vec<Registration>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                groups: Vec::new(),
                verses: Vec::new(),
                registrations: Vec::new(),
            }
        }

        pub fn with_group(mut self, name: &str, password: &str) -> Self {
            let id = Uuid::new_v4();
            self.groups.push(Group {
                id,
                name: name.to_string(),
                password_hash: hash_password(id, password),
            });
            self
        }

        pub fn with_verse(mut self, text: &str, purpose: &str) -> Self {
            self.verses.push(Verse {
                id: Uuid::new_v4(),
                text: text.to_string(),
                purpose: purpose.to_string(),
            });
            self
        }

        /// Registers verse `verse` to group `group` (indexes into the fixture).
        pub fn with_registration(mut self, group: usize, verse: usize) -> Self {
            self.registrations.push(Registration::new(
                self.groups[group].id,
                self.verses[verse].id,
            ));
            self
        }

        pub fn group_id(&self, index: usize) -> Uuid {
            self.groups[index].id
        }

        pub fn verse_id(&self, index: usize) -> Uuid {
            self.verses[index].id
        }

        pub fn build(&self) -> InMemoryStore {
            let backend = MemBackend::new()
                .with_raw(Collection::Groups, &to_json(&self.groups))
                .with_raw(Collection::Verses, &to_json(&self.verses))
                .with_raw(Collection::Registrations, &to_json(&self.registrations));
            VerseStore::with_backend(backend)
        }
    }

    fn to_json<T: serde::Serialize>(records: &[T]) -> String {
        serde_json::to_string_pretty(records).expect("fixture records serialize")
    }
}
