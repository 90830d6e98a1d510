//! Ports (driven interfaces) the domain services depend on.
//!
//! Adapters under `outbound/` implement these traits; services only ever see
//! the trait objects, keeping persistence swappable.

mod macros;
mod note_repository;
mod user_repository;

pub(crate) use macros::define_port_error;
pub use note_repository::{NotePersistenceError, NoteRepository};
pub use user_repository::{UserPersistenceError, UserRepository};
