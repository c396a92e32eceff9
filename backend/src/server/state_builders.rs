//! Wiring from the connection pool to the HTTP handler state.

use std::sync::Arc;

use mockable::DefaultClock;

use crate::domain::{SnippetLifecycleService, UserAccountService};
use crate::inbound::http::state::HttpState;
use crate::outbound::crypto::BcryptPasswordHasher;
use crate::outbound::persistence::{DbPool, DieselSnippetRepository, DieselUserRepository};

/// Build the production handler state: Diesel repositories, bcrypt at cost 12
/// and the system clock.
pub fn build_http_state(pool: &DbPool) -> HttpState {
    let snippets = SnippetLifecycleService::new(
        Arc::new(DieselSnippetRepository::new(pool.clone())),
        Arc::new(DefaultClock),
    );
    let accounts = UserAccountService::new(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(BcryptPasswordHasher::new()),
    );
    HttpState::new(Arc::new(snippets), Arc::new(accounts), Arc::new(DefaultClock))
}
