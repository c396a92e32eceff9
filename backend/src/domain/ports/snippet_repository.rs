//! Port abstraction for snippet persistence adapters and their errors.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Snippet, SnippetId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by snippet repository adapters.
    pub enum SnippetPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "snippet repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "snippet repository query failed: {message}",
    }
}

/// Row values for a snippet about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSnippetRecord {
    /// Snippet title.
    pub title: String,
    /// Snippet body.
    pub content: String,
    /// Insertion time.
    pub created: DateTime<Utc>,
    /// Expiry time.
    pub expires: DateTime<Utc>,
}

/// Storage for snippets. Reads only ever return rows whose expiry is after
/// the supplied `now`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnippetRepository: Send + Sync {
    /// Insert a snippet and return the store-assigned identifier.
    async fn insert(&self, record: NewSnippetRecord) -> Result<SnippetId, SnippetPersistenceError>;

    /// Fetch the snippet with `id` if it is still active at `now`.
    async fn find_active(
        &self,
        id: SnippetId,
        now: DateTime<Utc>,
    ) -> Result<Option<Snippet>, SnippetPersistenceError>;

    /// Fetch up to `limit` snippets active at `now`, newest identifier first.
    async fn latest_active(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Snippet>, SnippetPersistenceError>;
}
