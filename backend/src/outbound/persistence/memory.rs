//! In-memory repository adapters.
//!
//! Notes are keyed by slug and users by username, so the uniqueness
//! invariant is the map key itself: insert and update take the write lock
//! once and check-then-commit inside that single critical section. This is
//! the in-process equivalent of a database uniqueness constraint.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::note::Note;
use crate::domain::ports::{
    NotePersistenceError, NoteRepository, UserPersistenceError, UserRepository,
};
use crate::domain::slug::Slug;
use crate::domain::user::{User, UserId, Username};

/// Slug-keyed in-memory note store.
#[derive(Default)]
pub struct MemoryNoteRepository {
    notes: RwLock<HashMap<String, Note>>,
}

impl MemoryNoteRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteRepository for MemoryNoteRepository {
    async fn insert_if_slug_absent(&self, note: &Note) -> Result<(), NotePersistenceError> {
        let mut notes = self
            .notes
            .write()
            .map_err(|_| NotePersistenceError::query("note store lock poisoned"))?;
        let key = note.slug().as_ref().to_owned();
        if notes.contains_key(&key) {
            return Err(NotePersistenceError::duplicate_slug(key));
        }
        notes.insert(key, note.clone());
        Ok(())
    }

    async fn update_if_slug_free(
        &self,
        note: &Note,
        current_slug: &Slug,
    ) -> Result<(), NotePersistenceError> {
        let mut notes = self
            .notes
            .write()
            .map_err(|_| NotePersistenceError::query("note store lock poisoned"))?;
        let new_key = note.slug().as_ref();
        if new_key != current_slug.as_ref() && notes.contains_key(new_key) {
            return Err(NotePersistenceError::duplicate_slug(new_key));
        }
        let Some(stored) = notes.remove(current_slug.as_ref()) else {
            return Err(NotePersistenceError::query(format!(
                "no note stored under slug '{current_slug}'"
            )));
        };
        if stored.id() != note.id() {
            // The slot changed hands between read and write; put it back.
            notes.insert(current_slug.as_ref().to_owned(), stored);
            return Err(NotePersistenceError::query(format!(
                "slug '{current_slug}' no longer names the edited note"
            )));
        }
        notes.insert(new_key.to_owned(), note.clone());
        Ok(())
    }

    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Note>, NotePersistenceError> {
        let notes = self
            .notes
            .read()
            .map_err(|_| NotePersistenceError::query("note store lock poisoned"))?;
        Ok(notes.get(slug.as_ref()).cloned())
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Note>, NotePersistenceError> {
        let notes = self
            .notes
            .read()
            .map_err(|_| NotePersistenceError::query("note store lock poisoned"))?;
        let mut owned: Vec<Note> = notes
            .values()
            .filter(|note| note.author() == author)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.slug().as_ref().cmp(b.slug().as_ref()));
        Ok(owned)
    }

    async fn delete_by_slug(&self, slug: &Slug) -> Result<bool, NotePersistenceError> {
        let mut notes = self
            .notes
            .write()
            .map_err(|_| NotePersistenceError::query("note store lock poisoned"))?;
        Ok(notes.remove(slug.as_ref()).is_some())
    }
}

/// Username-keyed in-memory account store.
#[derive(Default)]
pub struct MemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert_if_username_absent(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))?;
        let key = user.username().as_ref().to_owned();
        if users.contains_key(&key) {
            return Err(UserPersistenceError::duplicate_username(key));
        }
        users.insert(key, user.clone());
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let users = self
            .users
            .read()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))?;
        Ok(users.get(username.as_ref()).cloned())
    }
}
