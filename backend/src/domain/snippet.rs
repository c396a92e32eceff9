//! Snippet entity and its identifier.
//!
//! Snippets are written once and never updated. A snippet is active while its
//! expiry lies in the future; inactive rows stay in the store but are hidden
//! from every read.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

/// Maximum title length in Unicode code points.
pub const TITLE_MAX_CHARS: usize = 100;
/// Maximum content length in Unicode code points.
pub const CONTENT_MAX_CHARS: usize = 4000;
/// Lifetimes, in days, a snippet may be created with.
pub const PERMITTED_EXPIRY_DAYS: [i32; 3] = [1, 7, 365];
/// Lifetime preselected on the create form.
pub const DEFAULT_EXPIRY_DAYS: i32 = 365;
/// Number of snippets shown on the home page.
pub const LATEST_SNIPPETS_LIMIT: usize = 10;

/// Validation errors returned by [`SnippetId::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnippetIdError {
    /// Identifiers start at one.
    #[error("snippet id must be a positive integer, got {0}")]
    NotPositive(i64),
    /// The raw value was not a base-10 integer.
    #[error("snippet id must be an integer")]
    NotAnInteger,
}

/// Store-assigned snippet identifier.
///
/// ## Invariants
/// - The wrapped value is at least `1`.
///
/// # Examples
/// ```
/// use snippetbox::domain::SnippetId;
///
/// let id: SnippetId = "42".parse().unwrap();
/// assert_eq!(id.get(), 42);
/// assert!("0".parse::<SnippetId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SnippetId(i64);

impl SnippetId {
    /// Wrap a positive identifier.
    pub fn new(value: i64) -> Result<Self, SnippetIdError> {
        if value < 1 {
            return Err(SnippetIdError::NotPositive(value));
        }
        Ok(Self(value))
    }

    /// Raw identifier value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl FromStr for SnippetId {
    type Err = SnippetIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .parse::<i64>()
            .map_err(|_| SnippetIdError::NotAnInteger)?;
        Self::new(value)
    }
}

impl fmt::Display for SnippetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    /// Store-assigned identifier.
    pub id: SnippetId,
    /// Short heading, at most [`TITLE_MAX_CHARS`] code points.
    pub title: String,
    /// Body text, at most [`CONTENT_MAX_CHARS`] code points.
    pub content: String,
    /// Insertion time.
    pub created: DateTime<Utc>,
    /// Instant after which the snippet is no longer served.
    pub expires: DateTime<Utc>,
}

impl Snippet {
    /// Return `true` while `now` is strictly before the expiry.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.expires > now
    }
}

/// Validated input for a new snippet.
///
/// Built by the create form once its rules pass; the service does not
/// re-validate the shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetDraft {
    /// Snippet title.
    pub title: String,
    /// Snippet body.
    pub content: String,
    /// Lifetime in days, one of [`PERMITTED_EXPIRY_DAYS`].
    pub expires_days: i32,
}
