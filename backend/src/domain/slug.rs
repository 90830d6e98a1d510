//! Slug value type and title-based derivation.
//!
//! Slugs are trimmed, non-empty identifiers composed of lowercase ASCII
//! letters, digits, and hyphens. When a note is created without an explicit
//! slug, one is derived from the title by transliterating it to ASCII,
//! lowercasing, and collapsing everything else into single hyphens.

use std::fmt;

use deunicode::deunicode;
use serde::{Deserialize, Serialize};

/// Validation errors returned by the [`Slug`] constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlugValidationError {
    /// The slug was empty or not trimmed.
    Empty,
    /// The slug contained characters outside `[a-z0-9-]`.
    InvalidCharacters,
    /// The title produced no transliterable characters to derive from.
    UnderivableTitle,
}

impl fmt::Display for SlugValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "slug must not be empty"),
            Self::InvalidCharacters => write!(
                f,
                "slug may only contain lowercase ASCII letters, digits, or hyphens",
            ),
            Self::UnderivableTitle => {
                write!(f, "title does not contain characters a slug can be derived from")
            }
        }
    }
}

impl std::error::Error for SlugValidationError {}

/// URL-safe unique identifier for a note.
///
/// ## Invariants
/// - Non-empty and trimmed.
/// - Only lowercase ASCII letters, digits, and hyphens.
///
/// # Examples
/// ```
/// use notes_backend::domain::Slug;
///
/// let slug = Slug::new("zagolovok").unwrap();
/// assert_eq!(slug.as_ref(), "zagolovok");
/// assert_eq!(Slug::derive("Заголовок").unwrap(), slug);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Validate and construct a [`Slug`] from caller-supplied input.
    pub fn new(slug: impl Into<String>) -> Result<Self, SlugValidationError> {
        let slug = slug.into();
        if !is_trimmed_non_empty(&slug) {
            return Err(SlugValidationError::Empty);
        }
        if !has_allowed_slug_chars(&slug) {
            return Err(SlugValidationError::InvalidCharacters);
        }
        Ok(Self(slug))
    }

    /// Derive a slug from a note title.
    ///
    /// Non-ASCII scripts are transliterated phonetically, the result is
    /// lowercased, and runs of anything outside `[a-z0-9]` collapse into a
    /// single hyphen. Derivation is deterministic: an unchanged title always
    /// yields the same slug.
    pub fn derive(title: &str) -> Result<Self, SlugValidationError> {
        let mut derived = String::with_capacity(title.len());
        let mut pending_hyphen = false;
        for ch in deunicode(title).to_lowercase().chars() {
            if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
                if pending_hyphen && !derived.is_empty() {
                    derived.push('-');
                }
                pending_hyphen = false;
                derived.push(ch);
            } else {
                pending_hyphen = true;
            }
        }
        if derived.is_empty() {
            return Err(SlugValidationError::UnderivableTitle);
        }
        Ok(Self(derived))
    }

    /// Produce the nth disambiguation candidate for this slug (`base-2`,
    /// `base-3`, …).
    pub fn with_counter(&self, counter: u32) -> Self {
        Self(format!("{}-{counter}", self.0))
    }
}

fn is_trimmed_non_empty(value: &str) -> bool {
    !value.is_empty() && value.trim() == value
}

fn has_allowed_slug_chars(value: &str) -> bool {
    value
        .chars()
        .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
