//! PostgreSQL-backed `SnippetRepository` implementation using Diesel ORM.
//!
//! Expiry filtering happens in SQL against the `now` supplied by the domain,
//! so the database clock never decides what is visible.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{NewSnippetRecord, SnippetPersistenceError, SnippetRepository};
use crate::domain::{Snippet, SnippetId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{NewSnippetRow, SnippetRow};
use super::pool::{DbPool, PoolError};
use super::schema::snippets;

/// Diesel-backed implementation of the `SnippetRepository` port.
#[derive(Clone)]
pub struct DieselSnippetRepository {
    pool: DbPool,
}

impl DieselSnippetRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SnippetPersistenceError {
    SnippetPersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> SnippetPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => SnippetPersistenceError::connection(message),
        DieselFailure::Query(message) => SnippetPersistenceError::query(message),
        DieselFailure::UniqueViolation { .. } => {
            SnippetPersistenceError::query("snippet identifier collision")
        }
    }
}

fn row_to_snippet(row: SnippetRow) -> Result<Snippet, SnippetPersistenceError> {
    let id = SnippetId::new(row.id).map_err(|err| {
        SnippetPersistenceError::query(format!("invalid snippet id in database: {err}"))
    })?;
    Ok(Snippet {
        id,
        title: row.title,
        content: row.content,
        created: row.created,
        expires: row.expires,
    })
}

#[async_trait]
impl SnippetRepository for DieselSnippetRepository {
    async fn insert(
        &self,
        record: NewSnippetRecord,
    ) -> Result<SnippetId, SnippetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewSnippetRow {
            title: &record.title,
            content: &record.content,
            created: record.created,
            expires: record.expires,
        };

        let id: i64 = diesel::insert_into(snippets::table)
            .values(&row)
            .returning(snippets::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        SnippetId::new(id).map_err(|err| {
            SnippetPersistenceError::query(format!("database assigned invalid snippet id: {err}"))
        })
    }

    async fn find_active(
        &self,
        id: SnippetId,
        now: DateTime<Utc>,
    ) -> Result<Option<Snippet>, SnippetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = snippets::table
            .filter(snippets::id.eq(id.get()))
            .filter(snippets::expires.gt(now))
            .select(SnippetRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_snippet).transpose()
    }

    async fn latest_active(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Snippet>, SnippetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let rows: Vec<SnippetRow> = snippets::table
            .filter(snippets::expires.gt(now))
            .order(snippets::id.desc())
            .limit(limit)
            .select(SnippetRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_snippet).collect()
    }
}
