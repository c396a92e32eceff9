//! User account service.
//!
//! Implements the [`AccountService`] driving port. Registration always
//! attempts the insert and lets the store's unique constraint decide on
//! duplicates. Authentication runs a password verification on every path so
//! unknown emails and wrong passwords are indistinguishable to the caller.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::domain::ports::{
    AccountService, NewUserRecord, PasswordHash, PasswordHashError, PasswordHasher,
    UserPersistenceError, UserRepository,
};
use crate::domain::{Error, LoginCredentials, Registration, UserId};

const DECOY_PASSWORD: &str = "snippetbox-decoy-password";

/// Domain service implementing signup, login and session user checks.
pub struct UserAccountService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
    decoy_hash: OnceCell<PasswordHash>,
}

impl<U, H> UserAccountService<U, H> {
    /// Create a new service over the user store and password hasher.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self {
            users,
            hasher,
            decoy_hash: OnceCell::new(),
        }
    }
}

impl<U, H> UserAccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    /// Hash verified against when the email is unknown.
    ///
    /// Produced by the same hasher as real hashes so it carries the same cost.
    async fn decoy_hash(&self) -> Result<&PasswordHash, Error> {
        self.decoy_hash
            .get_or_try_init(|| async {
                self.hasher
                    .hash(DECOY_PASSWORD)
                    .await
                    .map_err(map_hash_error)
            })
            .await
    }
}

#[async_trait]
impl<U, H> AccountService for UserAccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, registration: Registration) -> Result<UserId, Error> {
        let hashed_password = self
            .hasher
            .hash(registration.password())
            .await
            .map_err(map_hash_error)?;

        let record = NewUserRecord {
            name: registration.name().to_owned(),
            email: registration.email().to_owned(),
            hashed_password,
        };
        self.users.insert(record).await.map_err(map_user_error)
    }

    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let stored = self
            .users
            .find_credentials_by_email(credentials.email())
            .await
            .map_err(map_user_error)?;

        let Some(found) = stored else {
            let decoy = self.decoy_hash().await?;
            self.hasher
                .verify(credentials.password(), decoy)
                .await
                .map_err(map_hash_error)?;
            return Err(Error::invalid_credentials());
        };

        let matched = self
            .hasher
            .verify(credentials.password(), &found.hashed_password)
            .await
            .map_err(map_hash_error)?;
        if matched {
            Ok(found.id)
        } else {
            Err(Error::invalid_credentials())
        }
    }

    async fn exists(&self, id: UserId) -> Result<bool, Error> {
        self.users.exists(id).await.map_err(map_user_error)
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::DuplicateEmail => Error::duplicate_email(),
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
