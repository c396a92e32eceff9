//! Authentication primitives: login credentials and signup registrations.
//!
//! Both types are built by the inbound forms after validation passes. Plain
//! passwords live in zeroizing buffers and never reach a log line or the
//! store.

use std::fmt;

use zeroize::Zeroizing;

/// Credentials presented on the login form.
///
/// `Debug` redacts the password.
///
/// # Examples
/// ```
/// use snippetbox::domain::LoginCredentials;
///
/// let creds = LoginCredentials::new("alice@example.com", "pa55word");
/// assert_eq!(creds.email(), "alice@example.com");
/// assert!(!format!("{creds:?}").contains("pa55word"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Build credentials from already validated form input.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Email used for the credential lookup.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A validated signup request.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    name: String,
    email: String,
    password: Zeroizing<String>,
}

impl Registration {
    /// Build a registration from already validated form input.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Email address, unique across users.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Plain password, hashed before persistence.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
