//! Port abstraction for note persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::note::Note;
use crate::domain::slug::Slug;
use crate::domain::user::UserId;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by note repository adapters.
    pub enum NotePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "note repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "note repository query failed: {message}",
        /// The slug is already taken by another note.
        DuplicateSlug { slug: String } => "slug '{slug}' is already in use",
    }
}

/// Storage boundary for notes.
///
/// Uniqueness of slugs is enforced HERE, not in callers: the insert and
/// update operations check and commit inside a single critical section so
/// concurrent writers cannot race a check-then-act window.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert the note if its slug is unclaimed.
    ///
    /// Fails with [`NotePersistenceError::DuplicateSlug`] when another note
    /// already holds the slug; nothing is written in that case.
    async fn insert_if_slug_absent(&self, note: &Note) -> Result<(), NotePersistenceError>;

    /// Replace the note stored under `current_slug` with `note`, atomically
    /// re-keying when the slug changed.
    ///
    /// Fails with [`NotePersistenceError::DuplicateSlug`] when the new slug
    /// is held by a different note; the stored note is left untouched.
    async fn update_if_slug_free(
        &self,
        note: &Note,
        current_slug: &Slug,
    ) -> Result<(), NotePersistenceError>;

    /// Fetch a note by slug.
    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Note>, NotePersistenceError>;

    /// All notes created by the given author.
    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Note>, NotePersistenceError>;

    /// Remove the note stored under the slug. Returns whether a note was
    /// removed.
    async fn delete_by_slug(&self, slug: &Slug) -> Result<bool, NotePersistenceError>;
}
