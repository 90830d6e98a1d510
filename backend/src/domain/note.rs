//! Note aggregate and its value types.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::slug::Slug;
use crate::domain::user::UserId;

/// Validation errors returned by the note value type constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    EmptyTitle,
    TitleTooLong { max: usize },
}

impl fmt::Display for NoteValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong { max } => {
                write!(f, "title must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for NoteValidationError {}

/// Opaque note identifier assigned at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(Uuid);

impl NoteId {
    /// Generate a new random [`NoteId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-empty note title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NoteTitle(String);

/// Maximum allowed length for a note title.
pub const TITLE_MAX: usize = 100;

impl NoteTitle {
    /// Validate and construct a [`NoteTitle`] from owned input.
    pub fn new(title: impl Into<String>) -> Result<Self, NoteValidationError> {
        let title = title.into();
        let normalized = title.trim();
        if normalized.is_empty() {
            return Err(NoteValidationError::EmptyTitle);
        }
        if normalized.chars().count() > TITLE_MAX {
            return Err(NoteValidationError::TitleTooLong { max: TITLE_MAX });
        }
        Ok(Self(normalized.to_owned()))
    }
}

impl AsRef<str> for NoteTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for NoteTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<NoteTitle> for String {
    fn from(value: NoteTitle) -> Self {
        value.0
    }
}

impl TryFrom<String> for NoteTitle {
    type Error = NoteValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A personal text note.
///
/// ## Invariants
/// - `slug` is unique across the note collection (enforced by the
///   repository's atomic insert/update operations).
/// - `author` never changes after creation; the field has no setter and
///   [`Note::with_update`] carries it over untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    id: NoteId,
    title: NoteTitle,
    text: String,
    slug: Slug,
    author: UserId,
}

impl Note {
    /// Build a new [`Note`] from validated components.
    pub fn new(id: NoteId, title: NoteTitle, text: String, slug: Slug, author: UserId) -> Self {
        Self {
            id,
            title,
            text,
            slug,
            author,
        }
    }

    /// Opaque identifier assigned at creation.
    pub fn id(&self) -> &NoteId {
        &self.id
    }

    /// Note title.
    pub fn title(&self) -> &NoteTitle {
        &self.title
    }

    /// Note body.
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// URL-safe unique identifier.
    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    /// The user who created the note.
    pub fn author(&self) -> &UserId {
        &self.author
    }

    /// Produce the edited version of this note.
    ///
    /// Identity and authorship are preserved; title, text, and slug are
    /// replaced as a whole so edits commit all-or-nothing.
    pub fn with_update(&self, title: NoteTitle, text: String, slug: Slug) -> Self {
        Self {
            id: self.id.clone(),
            title,
            text,
            slug,
            author: self.author.clone(),
        }
    }
}
