//! Snippet lifecycle service.
//!
//! Implements the [`SnippetService`] driving port: stamps creation and expiry
//! times from the injected clock and hides snippets whose expiry has passed.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::TimeDelta;
use mockable::Clock;

use crate::domain::ports::{
    NewSnippetRecord, SnippetPersistenceError, SnippetRepository, SnippetService,
};
use crate::domain::{Error, Snippet, SnippetDraft, SnippetId};

/// Domain service implementing snippet create and read behaviour.
#[derive(Clone)]
pub struct SnippetLifecycleService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> SnippetLifecycleService<R> {
    /// Create a new service over `repo`, reading time from `clock`.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

#[async_trait]
impl<R> SnippetService for SnippetLifecycleService<R>
where
    R: SnippetRepository,
{
    async fn insert(&self, draft: SnippetDraft) -> Result<SnippetId, Error> {
        let created = self.clock.utc();
        let lifetime = TimeDelta::try_days(i64::from(draft.expires_days)).ok_or_else(|| {
            Error::internal(format!("snippet lifetime out of range: {}", draft.expires_days))
        })?;
        let expires = created
            .checked_add_signed(lifetime)
            .ok_or_else(|| Error::internal("snippet expiry overflows the calendar"))?;

        let record = NewSnippetRecord {
            title: draft.title,
            content: draft.content,
            created,
            expires,
        };
        self.repo.insert(record).await.map_err(map_repository_error)
    }

    async fn get(&self, id: SnippetId) -> Result<Snippet, Error> {
        self.repo
            .find_active(id, self.clock.utc())
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("no active snippet with id {id}")))
    }

    async fn latest_active(&self, limit: usize) -> Result<Vec<Snippet>, Error> {
        self.repo
            .latest_active(self.clock.utc(), limit)
            .await
            .map_err(map_repository_error)
    }
}

fn map_repository_error(error: SnippetPersistenceError) -> Error {
    match error {
        SnippetPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("snippet repository unavailable: {message}"))
        }
        SnippetPersistenceError::Query { message } => {
            Error::internal(format!("snippet repository error: {message}"))
        }
    }
}

#[cfg(test)]
#[path = "snippet_service_tests.rs"]
mod tests;
