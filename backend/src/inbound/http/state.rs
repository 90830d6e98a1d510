//! Shared application state handed to HTTP handlers.

use std::sync::Arc;

use crate::domain::{AccountsService, NotesService};
use crate::outbound::persistence::{MemoryNoteRepository, MemoryUserRepository};

/// Services the HTTP handlers dispatch into.
#[derive(Clone)]
pub struct HttpState {
    pub notes: NotesService,
    pub accounts: AccountsService,
}

impl HttpState {
    /// Wire the services over the given repositories.
    pub fn new(notes: NotesService, accounts: AccountsService) -> Self {
        Self { notes, accounts }
    }

    /// State backed by fresh in-memory stores.
    pub fn in_memory() -> Self {
        Self::new(
            NotesService::new(Arc::new(MemoryNoteRepository::new())),
            AccountsService::new(Arc::new(MemoryUserRepository::new())),
        )
    }
}
