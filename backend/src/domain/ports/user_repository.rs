//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::UserId;

use super::PasswordHash;
use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// The email unique constraint rejected the insert.
        DuplicateEmail => "user repository rejected duplicate email",
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Row values for a user about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserRecord {
    /// Display name.
    pub name: String,
    /// Email address; unique across users.
    pub email: String,
    /// bcrypt output for the chosen password.
    pub hashed_password: PasswordHash,
}

/// Identifier and stored hash looked up by email during login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    /// Owner of the hash.
    pub id: UserId,
    /// Stored bcrypt hash.
    pub hashed_password: PasswordHash,
}

/// Storage for user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user, relying on the store to enforce email uniqueness.
    ///
    /// Returns [`UserPersistenceError::DuplicateEmail`] when the email is
    /// already registered.
    async fn insert(&self, record: NewUserRecord) -> Result<UserId, UserPersistenceError>;

    /// Fetch the id and password hash registered for `email`.
    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError>;

    /// Return whether a user with `id` exists.
    async fn exists(&self, id: UserId) -> Result<bool, UserPersistenceError>;
}
