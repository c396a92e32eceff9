//! Driving port for snippet use-cases.
//!
//! Inbound adapters call this port to create and read snippets without
//! knowing about the backing store or the clock.

use async_trait::async_trait;

use crate::domain::{Error, Snippet, SnippetDraft, SnippetId};

/// Domain use-case port for snippets.
#[async_trait]
pub trait SnippetService: Send + Sync {
    /// Persist a validated draft and return its identifier.
    async fn insert(&self, draft: SnippetDraft) -> Result<SnippetId, Error>;

    /// Fetch an active snippet; expired and unknown ids are both not found.
    async fn get(&self, id: SnippetId) -> Result<Snippet, Error>;

    /// Up to `limit` active snippets, newest first.
    async fn latest_active(&self, limit: usize) -> Result<Vec<Snippet>, Error>;
}
