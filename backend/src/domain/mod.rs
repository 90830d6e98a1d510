//! Domain primitives, aggregates, and services.
//!
//! Purpose: define strongly typed entities and the rules engines that decide
//! note access and slug allocation. Types are immutable; invariants and
//! serialisation contracts (serde) live in each type's Rustdoc. Nothing in
//! this module knows about HTTP or storage engines.

pub mod accounts_service;
pub mod auth;
pub mod error;
pub mod note;
pub mod notes_service;
pub mod ports;
pub mod slug;
pub mod user;

#[cfg(test)]
mod notes_service_tests;

pub use self::accounts_service::AccountsService;
pub use self::auth::{Credentials, CredentialsValidationError, PasswordDigest};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::note::{Note, NoteId, NoteTitle, NoteValidationError};
pub use self::notes_service::{NoteDraft, NotesService};
pub use self::slug::{Slug, SlugValidationError};
pub use self::user::{Identity, User, UserId, UserValidationError, Username};
