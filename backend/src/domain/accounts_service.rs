//! Accounts domain service: signup and credential verification.

use std::sync::Arc;

use serde_json::json;

use crate::domain::Error;
use crate::domain::auth::Credentials;
use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::user::{User, UserId};

/// Accounts service implementing signup and login checks over a repository
/// port.
#[derive(Clone)]
pub struct AccountsService {
    repo: Arc<dyn UserRepository>,
}

impl AccountsService {
    /// Create a new service over the given repository.
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Register a new account and return its identifier.
    pub async fn sign_up(&self, credentials: &Credentials) -> Result<UserId, Error> {
        let user = User::new(
            UserId::random(),
            credentials.username().clone(),
            credentials.digest(),
        );
        self.repo
            .insert_if_username_absent(&user)
            .await
            .map_err(Self::map_repo_error)?;

        tracing::info!(username = %user.username(), "account created");
        Ok(user.id().clone())
    }

    /// Verify credentials and return the account's identifier.
    ///
    /// Unknown usernames and wrong passwords produce the same error so the
    /// response does not reveal which part failed.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<UserId, Error> {
        let user = self
            .repo
            .find_by_username(credentials.username())
            .await
            .map_err(Self::map_repo_error)?
            .ok_or_else(Self::invalid_credentials)?;

        if !user.password_digest().matches(&credentials.digest()) {
            return Err(Self::invalid_credentials());
        }
        Ok(user.id().clone())
    }

    fn invalid_credentials() -> Error {
        Error::unauthorized("invalid credentials")
    }

    fn map_repo_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::internal(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::DuplicateUsername { username } => {
                Error::invalid_request("this username is already taken").with_details(json!({
                    "field": "username",
                    "code": "duplicate_username",
                    "username": username,
                }))
            }
        }
    }
}
