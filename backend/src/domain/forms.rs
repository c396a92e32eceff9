//! Form models and their rule sets.
//!
//! Each form is a plain struct holding the submitted values and a
//! [`Validator`]. `validate` runs every rule so all failures surface together;
//! handlers then re-render the form with the accumulated messages or hand the
//! converted domain value to a service.

use std::fmt;

use zeroize::Zeroizing;

use super::snippet::{
    CONTENT_MAX_CHARS, DEFAULT_EXPIRY_DAYS, PERMITTED_EXPIRY_DAYS, SnippetDraft, TITLE_MAX_CHARS,
};
use super::validation::{
    Validator, email_regex, matches, max_chars, min_chars, not_blank, permitted_value,
};
use super::{LoginCredentials, Registration};

/// Minimum password length in Unicode code points.
pub const PASSWORD_MIN_CHARS: usize = 8;
/// Longest name or email the `users` table stores.
pub const ACCOUNT_FIELD_MAX_CHARS: usize = 255;

/// Message for blank required fields.
pub const MSG_BLANK: &str = "This field cannot be blank";
/// Message for an over-long title.
pub const MSG_TITLE_TOO_LONG: &str = "This field cannot be more than 100 characters long";
/// Message for over-long content.
pub const MSG_CONTENT_TOO_LONG: &str = "This field cannot be more than 4000 characters long";
/// Message for an over-long name or email.
pub const MSG_ACCOUNT_FIELD_TOO_LONG: &str = "This field cannot be more than 255 characters long";
/// Message for an unsupported expiry.
pub const MSG_EXPIRES: &str = "This field must equal 1, 7 or 365";
/// Message for a malformed email address.
pub const MSG_EMAIL: &str = "This field must be a valid email address";
/// Message for a short password.
pub const MSG_PASSWORD_TOO_SHORT: &str = "This field must be at least 8 characters long";
/// Field message shown when signup hits an existing email.
pub const MSG_DUPLICATE_EMAIL: &str = "Email address is already in use";
/// Non-field message shown for any failed login.
pub const MSG_BAD_CREDENTIALS: &str = "Email or password is incorrect";

/// The snippet creation form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetCreateForm {
    /// Submitted title.
    pub title: String,
    /// Submitted content.
    pub content: String,
    /// Submitted lifetime in days.
    pub expires: i32,
    /// Errors collected by [`Self::validate`].
    pub validator: Validator,
}

impl Default for SnippetCreateForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            expires: DEFAULT_EXPIRY_DAYS,
            validator: Validator::default(),
        }
    }
}

impl SnippetCreateForm {
    /// Build a form from decoded values with an empty validator.
    pub fn new(title: impl Into<String>, content: impl Into<String>, expires: i32) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            expires,
            validator: Validator::default(),
        }
    }

    /// Run the creation rules and return whether the form is valid.
    pub fn validate(&mut self) -> bool {
        let v = &mut self.validator;
        v.check_field(not_blank(&self.title), "title", MSG_BLANK);
        v.check_field(
            max_chars(&self.title, TITLE_MAX_CHARS),
            "title",
            MSG_TITLE_TOO_LONG,
        );
        v.check_field(not_blank(&self.content), "content", MSG_BLANK);
        v.check_field(
            max_chars(&self.content, CONTENT_MAX_CHARS),
            "content",
            MSG_CONTENT_TOO_LONG,
        );
        v.check_field(
            permitted_value(&self.expires, &PERMITTED_EXPIRY_DAYS),
            "expires",
            MSG_EXPIRES,
        );
        v.is_valid()
    }

    /// Convert the submitted values into a draft for the snippet service.
    pub fn to_draft(&self) -> SnippetDraft {
        SnippetDraft {
            title: self.title.clone(),
            content: self.content.clone(),
            expires_days: self.expires,
        }
    }
}

/// The signup form.
///
/// The password is never echoed back into a re-rendered page.
#[derive(Clone, Default)]
pub struct UserSignupForm {
    /// Submitted display name.
    pub name: String,
    /// Submitted email.
    pub email: String,
    password: Zeroizing<String>,
    /// Errors collected by [`Self::validate`] and the signup handler.
    pub validator: Validator,
}

impl UserSignupForm {
    /// Build a form from decoded values with an empty validator.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: Zeroizing::new(password.into()),
            validator: Validator::default(),
        }
    }

    /// Run the signup rules and return whether the form is valid.
    pub fn validate(&mut self) -> bool {
        let v = &mut self.validator;
        v.check_field(not_blank(&self.name), "name", MSG_BLANK);
        v.check_field(
            max_chars(&self.name, ACCOUNT_FIELD_MAX_CHARS),
            "name",
            MSG_ACCOUNT_FIELD_TOO_LONG,
        );
        v.check_field(not_blank(&self.email), "email", MSG_BLANK);
        v.check_field(
            max_chars(&self.email, ACCOUNT_FIELD_MAX_CHARS),
            "email",
            MSG_ACCOUNT_FIELD_TOO_LONG,
        );
        v.check_field(matches(&self.email, email_regex()), "email", MSG_EMAIL);
        v.check_field(not_blank(&self.password), "password", MSG_BLANK);
        v.check_field(
            min_chars(&self.password, PASSWORD_MIN_CHARS),
            "password",
            MSG_PASSWORD_TOO_SHORT,
        );
        v.is_valid()
    }

    /// Record that the email is already registered.
    pub fn reject_duplicate_email(&mut self) {
        self.validator.add_field_error("email", MSG_DUPLICATE_EMAIL);
    }

    /// Convert the submitted values into a registration request.
    pub fn to_registration(&self) -> Registration {
        Registration::new(
            self.name.as_str(),
            self.email.as_str(),
            self.password.as_str(),
        )
    }
}

impl fmt::Debug for UserSignupForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserSignupForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("validator", &self.validator)
            .finish()
    }
}

/// The login form.
#[derive(Clone, Default)]
pub struct UserLoginForm {
    /// Submitted email.
    pub email: String,
    password: Zeroizing<String>,
    /// Errors collected by [`Self::validate`] and the login handler.
    pub validator: Validator,
}

impl UserLoginForm {
    /// Build a form from decoded values with an empty validator.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Zeroizing::new(password.into()),
            validator: Validator::default(),
        }
    }

    /// Run the login rules and return whether the form is valid.
    pub fn validate(&mut self) -> bool {
        let v = &mut self.validator;
        v.check_field(not_blank(&self.email), "email", MSG_BLANK);
        v.check_field(matches(&self.email, email_regex()), "email", MSG_EMAIL);
        v.check_field(not_blank(&self.password), "password", MSG_BLANK);
        v.is_valid()
    }

    /// Record a failed authentication without revealing which part was wrong.
    pub fn reject_credentials(&mut self) {
        self.validator.add_non_field_error(MSG_BAD_CREDENTIALS);
    }

    /// Convert the submitted values into login credentials.
    pub fn to_credentials(&self) -> LoginCredentials {
        LoginCredentials::new(self.email.as_str(), self.password.as_str())
    }
}

impl fmt::Debug for UserLoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserLoginForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("validator", &self.validator)
            .finish()
    }
}
