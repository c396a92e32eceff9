//! PostgreSQL persistence adapters built on Diesel and `diesel-async`.
//!
//! - [`DbPool`]: bb8 pool of async connections shared by the repositories.
//! - [`DieselSnippetRepository`], [`DieselUserRepository`]: port adapters.
//! - [`run_pending_migrations`]: embedded schema migrations.
//!
//! Row structs and the table DSL stay private to this module.

mod diesel_error_mapping;
mod diesel_snippet_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_snippet_repository::DieselSnippetRepository;
pub use diesel_user_repository::{DieselUserRepository, EMAIL_UNIQUE_CONSTRAINT};
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_CHECKOUT_TIMEOUT, DEFAULT_MAX_SIZE, DbPool, PoolConfig, PoolError};
