//! Driving port for account use-cases: signup, login and session checks.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Registration, UserId};

/// Domain use-case port for user accounts.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Register a new user.
    ///
    /// Fails with [`crate::domain::ErrorCode::DuplicateEmail`] when the email
    /// is taken.
    async fn register(&self, registration: Registration) -> Result<UserId, Error>;

    /// Validate credentials and return the authenticated user id.
    ///
    /// Unknown emails and wrong passwords fail with the same
    /// [`crate::domain::ErrorCode::InvalidCredentials`] error.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;

    /// Return whether `id` still names a user.
    async fn exists(&self, id: UserId) -> Result<bool, Error>;
}
