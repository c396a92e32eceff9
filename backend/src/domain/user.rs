//! User identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned by [`UserId::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Identifiers assigned by the store start at one.
    #[error("user id must be a positive integer, got {0}")]
    NonPositiveId(i64),
}

/// Store-assigned user identifier.
///
/// Serialised as a bare integer so it can live in the session cookie.
///
/// ## Invariants
/// - The wrapped value is at least `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserId(i64);

impl UserId {
    /// Validate and wrap a store identifier.
    pub fn new(value: i64) -> Result<Self, UserValidationError> {
        if value < 1 {
            return Err(UserValidationError::NonPositiveId(value));
        }
        Ok(Self(value))
    }

    /// Raw identifier value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<i64> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
