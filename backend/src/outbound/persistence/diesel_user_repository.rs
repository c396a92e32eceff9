//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Email uniqueness is left to the `users_uc_email` constraint; the insert is
//! attempted unconditionally and a violation of that constraint is reported as
//! [`UserPersistenceError::DuplicateEmail`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::UserId;
use crate::domain::ports::{
    NewUserRecord, PasswordHash, StoredCredentials, UserPersistenceError, UserRepository,
};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{CredentialsRow, NewUserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Name of the unique constraint on `users.email`.
pub const EMAIL_UNIQUE_CONSTRAINT: &str = "users_uc_email";

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    let failure = classify_diesel_error(error);
    if failure.violates(EMAIL_UNIQUE_CONSTRAINT) {
        return UserPersistenceError::duplicate_email();
    }
    match failure {
        DieselFailure::Connection(message) => UserPersistenceError::connection(message),
        DieselFailure::Query(message) => UserPersistenceError::query(message),
        DieselFailure::UniqueViolation { constraint } => UserPersistenceError::query(format!(
            "unexpected unique violation on {}",
            constraint.as_deref().unwrap_or("unnamed constraint")
        )),
    }
}

fn user_id_from_row(id: i64) -> Result<UserId, UserPersistenceError> {
    UserId::new(id)
        .map_err(|err| UserPersistenceError::query(format!("invalid user id in database: {err}")))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, record: NewUserRecord) -> Result<UserId, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            name: &record.name,
            email: &record.email,
            hashed_password: record.hashed_password.as_str(),
        };

        let id: i64 = diesel::insert_into(users::table)
            .values(&row)
            .returning(users::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        user_id_from_row(id)
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::email.eq(email))
            .select(CredentialsRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(|row| {
            Ok(StoredCredentials {
                id: user_id_from_row(row.id)?,
                hashed_password: PasswordHash::new(row.hashed_password),
            })
        })
        .transpose()
    }

    async fn exists(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            users::table.filter(users::id.eq(id.get())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }
}
