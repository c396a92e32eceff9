//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_service;
mod password_hasher;
mod snippet_repository;
mod snippet_service;
mod user_repository;

pub use account_service::AccountService;
pub use password_hasher::{PasswordHash, PasswordHashError, PasswordHasher};
pub use snippet_repository::{NewSnippetRecord, SnippetPersistenceError, SnippetRepository};
pub use snippet_service::SnippetService;
pub use user_repository::{
    NewUserRecord, StoredCredentials, UserPersistenceError, UserRepository,
};

#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
#[cfg(test)]
pub use snippet_repository::MockSnippetRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
