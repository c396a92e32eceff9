//! Page view models rendered with askama.
//!
//! Each page struct carries the common [`TemplateData`] plus whatever the page
//! shows. Templates live in `backend/templates/` and are compiled into the
//! binary.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use askama::Template;
use chrono::{DateTime, Datelike, Utc};
use mockable::Clock;

use crate::domain::{Error, Snippet, SnippetCreateForm, UserLoginForm, UserSignupForm};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Data every page receives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateData {
    /// Year shown in the footer.
    pub current_year: i32,
    /// One-shot message popped from the session.
    pub flash: Option<String>,
    /// Whether the visitor is logged in as an existing user.
    pub is_authenticated: bool,
}

impl TemplateData {
    /// Flash message, if one was queued.
    pub fn flash(&self) -> Option<&str> {
        self.flash.as_deref()
    }
}

/// Gather the common page data for the current request.
///
/// Pops the flash message, so call this once per rendered page. A session
/// user id only counts as authenticated while the account still exists.
pub async fn template_data(
    state: &HttpState,
    session: &SessionContext,
) -> Result<TemplateData, Error> {
    let is_authenticated = match session.user_id() {
        Some(id) => state.accounts.exists(id).await?,
        None => false,
    };
    Ok(TemplateData {
        current_year: state.clock.utc().year(),
        flash: session.take_flash(),
        is_authenticated,
    })
}

/// Snippet fields formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetView {
    /// Identifier used in links.
    pub id: i64,
    /// Title text.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Human readable creation time.
    pub created: String,
    /// Human readable expiry time.
    pub expires: String,
}

impl From<Snippet> for SnippetView {
    fn from(snippet: Snippet) -> Self {
        Self {
            id: snippet.id.get(),
            title: snippet.title,
            content: snippet.content,
            created: human_date(snippet.created),
            expires: human_date(snippet.expires),
        }
    }
}

/// Format a timestamp as `02 Jan 2006 at 15:04` in UTC.
pub fn human_date(at: DateTime<Utc>) -> String {
    at.format("%d %b %Y at %H:%M").to_string()
}

/// Home page listing the latest snippets.
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomePage {
    /// Common page data.
    pub data: TemplateData,
    /// Snippets, newest first.
    pub snippets: Vec<SnippetView>,
}

/// Single snippet page.
#[derive(Template)]
#[template(path = "view.html")]
pub struct ViewPage {
    /// Common page data.
    pub data: TemplateData,
    /// The snippet shown.
    pub snippet: SnippetView,
}

/// Snippet creation form page.
#[derive(Template)]
#[template(path = "create.html")]
pub struct CreatePage {
    /// Common page data.
    pub data: TemplateData,
    /// Submitted or default values with their errors.
    pub form: SnippetCreateForm,
}

/// Signup form page.
#[derive(Template)]
#[template(path = "signup.html")]
pub struct SignupPage {
    /// Common page data.
    pub data: TemplateData,
    /// Submitted values with their errors.
    pub form: UserSignupForm,
}

/// Login form page.
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    /// Common page data.
    pub data: TemplateData,
    /// Submitted values with their errors.
    pub form: UserLoginForm,
}

/// Render `page` into an HTML response with `status`.
pub fn render<T: Template>(status: StatusCode, page: &T) -> Result<HttpResponse, Error> {
    let html = page
        .render()
        .map_err(|err| Error::internal(format!("template rendering failed: {err}")))?;
    Ok(HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(html))
}
