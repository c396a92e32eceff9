//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{AccountService, SnippetService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Snippet create and read use-cases.
    pub snippets: Arc<dyn SnippetService>,
    /// Signup, login and session user checks.
    pub accounts: Arc<dyn AccountService>,
    /// Time source for page chrome such as the footer year.
    pub clock: Arc<dyn Clock>,
}

impl HttpState {
    /// Bundle the driving ports used by the handlers.
    pub fn new(
        snippets: Arc<dyn SnippetService>,
        accounts: Arc<dyn AccountService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            snippets,
            accounts,
            clock,
        }
    }
}
