//! HTTP inbound adapter serving the server-rendered pages.

pub mod error;
pub mod forms;
pub mod health;
pub mod session;
pub mod session_config;
pub mod snippets;
pub mod state;
pub mod templates;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;

use actix_web::http::header;
use actix_web::{HttpResponse, web};

use crate::domain::Error;

/// Register every page handler plus the form extractor configuration.
///
/// Health probes are registered separately because they need no session.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(form_config())
        .service(snippets::home)
        .service(snippets::snippet_view)
        .service(snippets::snippet_create)
        .service(snippets::snippet_create_post)
        .service(users::signup)
        .service(users::signup_post)
        .service(users::login)
        .service(users::login_post)
        .service(users::logout);
}

/// Undecodable form bodies become plain 400 responses.
pub fn form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("malformed form body: {err}")).into()
    })
}

pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}
