//! Domain primitives, forms and services.
//!
//! Purpose: define the snippet and account model, the form validation engine
//! and the services that implement the driving ports. Nothing here knows
//! about HTTP, SQL or cookies; adapters reach the domain through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport agnostic failure type.
//! - Snippet, SnippetId, SnippetDraft: the snippet entity and its inputs.
//! - UserId, LoginCredentials, Registration: account identity and inputs.
//! - Validator and predicates in [`validation`]; form rule sets in [`forms`].
//! - SnippetLifecycleService, UserAccountService: port implementations.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod forms;
pub mod ports;
pub mod snippet;
pub mod snippet_service;
pub mod user;
pub mod validation;

pub use self::account_service::UserAccountService;
pub use self::auth::{LoginCredentials, Registration};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::forms::{SnippetCreateForm, UserLoginForm, UserSignupForm};
pub use self::snippet::{Snippet, SnippetDraft, SnippetId, SnippetIdError};
pub use self::snippet_service::SnippetLifecycleService;
pub use self::user::{UserId, UserValidationError};
pub use self::validation::Validator;
