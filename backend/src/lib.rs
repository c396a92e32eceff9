//! Snippetbox library: domain, adapters and server wiring.
//!
//! The binary in `main.rs` only loads settings and calls into [`server`].

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use middleware::Trace;
