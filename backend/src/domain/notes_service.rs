//! Notes domain service: access control and slug allocation.
//!
//! Every operation takes an explicit [`Identity`]; nothing here reads
//! ambient session state. Ownership is concealed: a non-owner asking about
//! an existing note receives exactly the not-found outcome a nonexistent
//! note would produce, so the response never discloses existence.

use std::sync::Arc;

use serde_json::json;

use crate::domain::Error;
use crate::domain::note::{Note, NoteId, NoteTitle, NoteValidationError};
use crate::domain::ports::{NotePersistenceError, NoteRepository};
use crate::domain::slug::{Slug, SlugValidationError};
use crate::domain::user::{Identity, UserId};

/// Caller-supplied fields for creating or editing a note.
///
/// `slug` is optional: when absent one is derived from the title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub text: String,
    pub slug: Option<String>,
}

/// Notes service implementing per-author access control over a repository
/// port.
#[derive(Clone)]
pub struct NotesService {
    repo: Arc<dyn NoteRepository>,
}

impl NotesService {
    /// Create a new service over the given repository.
    pub fn new(repo: Arc<dyn NoteRepository>) -> Self {
        Self { repo }
    }

    /// List the caller's own notes.
    ///
    /// Anonymous callers get the not-authenticated outcome, never an empty
    /// list.
    pub async fn list(&self, identity: &Identity) -> Result<Vec<Note>, Error> {
        let user = identity.require_user()?;
        self.repo
            .list_by_author(user)
            .await
            .map_err(Self::map_repo_error)
    }

    /// Create a note owned by the caller.
    pub async fn create(&self, identity: &Identity, draft: NoteDraft) -> Result<Note, Error> {
        let author = identity.require_user()?.clone();
        let title = NoteTitle::new(draft.title).map_err(Self::map_title_error)?;
        let slug = self
            .resolve_slug(&title, draft.slug.as_deref(), None)
            .await?;

        let note = Note::new(NoteId::random(), title, draft.text, slug, author);
        self.repo
            .insert_if_slug_absent(&note)
            .await
            .map_err(Self::map_repo_error)?;

        tracing::info!(slug = %note.slug(), author = %note.author(), "note created");
        Ok(note)
    }

    /// Fetch one of the caller's notes by slug.
    pub async fn view(&self, identity: &Identity, slug: &str) -> Result<Note, Error> {
        let user = identity.require_user()?;
        self.find_owned(user, slug).await
    }

    /// Edit one of the caller's notes.
    ///
    /// Title, text, and slug are replaced as a whole; if the new slug
    /// collides with another note, nothing is mutated.
    pub async fn edit(
        &self,
        identity: &Identity,
        slug: &str,
        draft: NoteDraft,
    ) -> Result<Note, Error> {
        let user = identity.require_user()?;
        let existing = self.find_owned(user, slug).await?;

        let title = NoteTitle::new(draft.title).map_err(Self::map_title_error)?;
        let new_slug = self
            .resolve_slug(&title, draft.slug.as_deref(), Some(&existing))
            .await?;

        let updated = existing.with_update(title, draft.text, new_slug);
        self.repo
            .update_if_slug_free(&updated, existing.slug())
            .await
            .map_err(Self::map_repo_error)?;

        tracing::info!(slug = %updated.slug(), author = %updated.author(), "note edited");
        Ok(updated)
    }

    /// Delete one of the caller's notes.
    pub async fn delete(&self, identity: &Identity, slug: &str) -> Result<(), Error> {
        let user = identity.require_user()?;
        let note = self.find_owned(user, slug).await?;

        self.repo
            .delete_by_slug(note.slug())
            .await
            .map_err(Self::map_repo_error)?;

        tracing::info!(slug = %note.slug(), author = %note.author(), "note deleted");
        Ok(())
    }

    /// Look up a note the caller owns, concealing everything else behind the
    /// not-found outcome.
    async fn find_owned(&self, user: &UserId, raw_slug: &str) -> Result<Note, Error> {
        // A slug that fails shape validation cannot name any stored note.
        let Ok(slug) = Slug::new(raw_slug) else {
            return Err(Self::note_not_found());
        };
        let note = self
            .repo
            .find_by_slug(&slug)
            .await
            .map_err(Self::map_repo_error)?
            .ok_or_else(Self::note_not_found)?;
        if note.author() != user {
            return Err(Self::note_not_found());
        }
        Ok(note)
    }

    /// Resolve the slug for a create or edit.
    ///
    /// Explicit slugs must be well-formed and unclaimed (the note being
    /// edited may keep its own). Derived slugs disambiguate deterministically
    /// with `-2`, `-3`, … suffixes. The repository's atomic insert/update
    /// remains the final guard against concurrent allocations.
    async fn resolve_slug(
        &self,
        title: &NoteTitle,
        explicit: Option<&str>,
        editing: Option<&Note>,
    ) -> Result<Slug, Error> {
        if let Some(raw) = explicit {
            let slug = Slug::new(raw).map_err(Self::map_slug_error)?;
            let holder = self
                .repo
                .find_by_slug(&slug)
                .await
                .map_err(Self::map_repo_error)?;
            if let Some(existing) = holder
                && editing.map(Note::id) != Some(existing.id())
            {
                return Err(Self::duplicate_slug_error(slug.as_ref()));
            }
            return Ok(slug);
        }

        let base = Slug::derive(title.as_ref()).map_err(Self::map_slug_error)?;
        let mut candidate = base.clone();
        let mut counter = 2_u32;
        loop {
            let holder = self
                .repo
                .find_by_slug(&candidate)
                .await
                .map_err(Self::map_repo_error)?;
            match holder {
                None => return Ok(candidate),
                Some(existing) if editing.map(Note::id) == Some(existing.id()) => {
                    return Ok(candidate);
                }
                Some(_) => {
                    candidate = base.with_counter(counter);
                    counter += 1;
                }
            }
        }
    }

    fn note_not_found() -> Error {
        Error::not_found("note not found")
    }

    fn duplicate_slug_error(slug: &str) -> Error {
        Error::invalid_request("a note with this slug already exists").with_details(json!({
            "field": "slug",
            "code": "duplicate_slug",
            "slug": slug,
        }))
    }

    fn map_repo_error(error: NotePersistenceError) -> Error {
        match error {
            NotePersistenceError::Connection { message } => {
                Error::internal(format!("note repository unavailable: {message}"))
            }
            NotePersistenceError::Query { message } => {
                Error::internal(format!("note repository error: {message}"))
            }
            NotePersistenceError::DuplicateSlug { slug } => Self::duplicate_slug_error(&slug),
        }
    }

    fn map_title_error(error: NoteValidationError) -> Error {
        Error::invalid_request(error.to_string()).with_details(json!({
            "field": "title",
            "code": "invalid_title",
        }))
    }

    fn map_slug_error(error: SlugValidationError) -> Error {
        let field = match error {
            SlugValidationError::UnderivableTitle => "title",
            SlugValidationError::Empty | SlugValidationError::InvalidCharacters => "slug",
        };
        Error::invalid_request(error.to_string()).with_details(json!({
            "field": field,
            "code": "invalid_slug",
        }))
    }
}
