//! Form validation primitives.
//!
//! Predicates are pure functions so every rule can be tested without a form or
//! a request. [`Validator`] is the per-request accumulator that forms hold as a
//! named field and feed with predicate results.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

/// Accumulates field-scoped and non-field validation errors for one form.
///
/// ## Invariants
/// - Each field holds at most one message; the first recorded failure wins.
/// - Non-field errors keep insertion order.
///
/// # Examples
/// ```
/// use snippetbox::domain::validation::{Validator, not_blank};
///
/// let mut validator = Validator::default();
/// validator.check_field(not_blank("  "), "title", "This field cannot be blank");
/// validator.check_field(false, "title", "ignored");
/// assert!(!validator.is_valid());
/// assert_eq!(validator.field_error("title"), Some("This field cannot be blank"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validator {
    field_errors: BTreeMap<String, String>,
    non_field_errors: Vec<String>,
}

impl Validator {
    /// Return `true` when no field or non-field error has been recorded.
    pub fn is_valid(&self) -> bool {
        self.field_errors.is_empty() && self.non_field_errors.is_empty()
    }

    /// Record `message` for `field` unless the field already has a message.
    pub fn add_field_error(&mut self, field: &str, message: &str) {
        self.field_errors
            .entry(field.to_owned())
            .or_insert_with(|| message.to_owned());
    }

    /// Record an error that is not attributable to a single input.
    pub fn add_non_field_error(&mut self, message: &str) {
        self.non_field_errors.push(message.to_owned());
    }

    /// Record `message` for `field` when `ok` is false.
    pub fn check_field(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.add_field_error(field, message);
        }
    }

    /// Message recorded for `field`, if any.
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.field_errors.get(field).map(String::as_str)
    }

    /// All field errors keyed by field name.
    pub fn field_errors(&self) -> &BTreeMap<String, String> {
        &self.field_errors
    }

    /// Errors not tied to a specific field, in the order they were added.
    pub fn non_field_errors(&self) -> &[String] {
        &self.non_field_errors
    }
}

/// Return `true` when `value` contains something other than whitespace.
pub fn not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Return `true` when `value` has at most `max` Unicode code points.
pub fn max_chars(value: &str, max: usize) -> bool {
    value.chars().count() <= max
}

/// Return `true` when `value` has at least `min` Unicode code points.
pub fn min_chars(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

/// Return `true` when `value` equals one of `permitted`.
pub fn permitted_value<T: PartialEq>(value: &T, permitted: &[T]) -> bool {
    permitted.contains(value)
}

/// Return `true` when `value` matches `pattern`.
///
/// Patterns passed here are expected to be anchored with `^` and `$`.
pub fn matches(value: &str, pattern: &Regex) -> bool {
    pattern.is_match(value)
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

/// Permissive RFC 5322 approximation used to sanity check email addresses.
///
/// Compiled once per process and shared between requests.
pub fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = concat!(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+",
            r"@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?",
            r"(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
        );
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}
