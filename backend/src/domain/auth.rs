//! Authentication primitives: login credentials and password digests.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::domain::user::{UserValidationError, Username};

/// Domain error returned when login or signup payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Username was missing or malformed.
    Username(UserValidationError),
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Username(err) => write!(f, "{err}"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

impl From<UserValidationError> for CredentialsValidationError {
    fn from(value: UserValidationError) -> Self {
        Self::Username(value)
    }
}

/// Validated login credentials used by the accounts service.
///
/// ## Invariants
/// - `username` satisfies the [`Username`] rules (trimmed, non-empty).
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use notes_backend::domain::Credentials;
///
/// let creds = Credentials::try_from_parts("Peter Pan", "neverland").unwrap();
/// assert_eq!(creds.username().as_ref(), "Peter Pan");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    username: Username,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let username = Username::new(username)?;
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }

        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username used for account lookups.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Digest of the presented password.
    pub fn digest(&self) -> PasswordDigest {
        PasswordDigest::from_password(self.password.as_str())
    }
}

/// Hex-encoded SHA-256 digest of an account password.
///
/// Authentication mechanics are an external concern for this application; a
/// digest rather than a tunable KDF keeps the account store honest without
/// pretending to be a credential vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Digest a raw password.
    pub fn from_password(password: &str) -> Self {
        let digest = Sha256::digest(password.as_bytes());
        Self(hex::encode(digest))
    }

    /// Whether the presented digest matches this one.
    pub fn matches(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw")]
    #[case("   ", "pw")]
    fn blank_usernames_are_rejected(#[case] username: &str, #[case] password: &str) {
        let err = Credentials::try_from_parts(username, password)
            .expect_err("blank username must fail");
        assert!(matches!(err, CredentialsValidationError::Username(_)));
    }

    #[test]
    fn blank_passwords_are_rejected() {
        let err = Credentials::try_from_parts("user", "").expect_err("blank password must fail");
        assert_eq!(err, CredentialsValidationError::EmptyPassword);
    }

    #[rstest]
    #[case("  Лев Толстой  ", "secret")]
    #[case("alice", "correct horse battery staple")]
    fn valid_credentials_trim_username(#[case] username: &str, #[case] password: &str) {
        let creds = Credentials::try_from_parts(username, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.username().as_ref(), username.trim());
    }

    #[test]
    fn digests_are_stable_and_discriminating() {
        let first = PasswordDigest::from_password("secret");
        let again = PasswordDigest::from_password("secret");
        let other = PasswordDigest::from_password("Secret");
        assert!(first.matches(&again));
        assert!(!first.matches(&other));
    }
}
