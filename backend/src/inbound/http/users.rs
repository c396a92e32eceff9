//! Account page handlers.
//!
//! ```text
//! GET  /user/signup   Signup form
//! POST /user/signup   Register and redirect to login
//! GET  /user/login    Login form
//! POST /user/login    Authenticate and start a session
//! POST /user/logout   End the session
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};

use crate::domain::{ErrorCode, UserLoginForm, UserSignupForm};
use crate::inbound::http::ApiResult;
use crate::inbound::http::forms::{FormFields, decode_login, decode_signup};
use crate::inbound::http::see_other;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::templates::{LoginPage, SignupPage, render, template_data};

/// Flash shown after a successful signup.
pub const SIGNUP_FLASH: &str = "Your signup was successful. Please log in.";
/// Flash shown after logging out.
pub const LOGOUT_FLASH: &str = "You've been logged out successfully!";

async fn signup_page(
    state: &HttpState,
    session: &SessionContext,
    status: StatusCode,
    form: UserSignupForm,
) -> ApiResult<HttpResponse> {
    let data = template_data(state, session).await?;
    render(status, &SignupPage { data, form })
}

async fn login_page(
    state: &HttpState,
    session: &SessionContext,
    status: StatusCode,
    form: UserLoginForm,
) -> ApiResult<HttpResponse> {
    let data = template_data(state, session).await?;
    render(status, &LoginPage { data, form })
}

/// Empty signup form.
#[get("/user/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    signup_page(&state, &session, StatusCode::OK, UserSignupForm::default()).await
}

/// Validate the signup form and create the account.
///
/// A duplicate email is reported on the email field; the store's unique
/// constraint decides, so concurrent signups cannot both succeed.
#[post("/user/signup")]
pub async fn signup_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Form<Vec<(String, String)>>,
) -> ApiResult<HttpResponse> {
    let mut form = decode_signup(&FormFields::from_pairs(body.into_inner()));
    if !form.validate() {
        return signup_page(&state, &session, StatusCode::UNPROCESSABLE_ENTITY, form).await;
    }

    match state.accounts.register(form.to_registration()).await {
        Ok(_) => {
            session.put_flash(SIGNUP_FLASH)?;
            Ok(see_other("/user/login"))
        }
        Err(err) if err.code() == ErrorCode::DuplicateEmail => {
            form.reject_duplicate_email();
            signup_page(&state, &session, StatusCode::UNPROCESSABLE_ENTITY, form).await
        }
        Err(err) => Err(err),
    }
}

/// Empty login form.
#[get("/user/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    login_page(&state, &session, StatusCode::OK, UserLoginForm::default()).await
}

/// Authenticate and store the user id in a freshly renewed session.
#[post("/user/login")]
pub async fn login_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Form<Vec<(String, String)>>,
) -> ApiResult<HttpResponse> {
    let mut form = decode_login(&FormFields::from_pairs(body.into_inner()));
    if !form.validate() {
        return login_page(&state, &session, StatusCode::UNPROCESSABLE_ENTITY, form).await;
    }

    match state.accounts.authenticate(&form.to_credentials()).await {
        Ok(user_id) => {
            session.persist_user(user_id)?;
            Ok(see_other("/snippet/create"))
        }
        Err(err) if err.code() == ErrorCode::InvalidCredentials => {
            form.reject_credentials();
            login_page(&state, &session, StatusCode::UNPROCESSABLE_ENTITY, form).await
        }
        Err(err) => Err(err),
    }
}

/// Drop the session user and return home.
#[post("/user/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    session.forget_user();
    session.put_flash(LOGOUT_FLASH)?;
    Ok(see_other("/"))
}

#[cfg(test)]
mod tests;
