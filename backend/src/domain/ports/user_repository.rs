//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::user::{User, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The username is already taken.
        DuplicateUsername { username: String } => "username '{username}' is already taken",
    }
}

/// Storage boundary for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert the user if the username is unclaimed.
    ///
    /// Fails with [`UserPersistenceError::DuplicateUsername`] when another
    /// account already holds the username.
    async fn insert_if_username_absent(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;
}
