//! Tests for the account page handlers.

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test;
use rstest::rstest;

use super::*;
use crate::domain::forms::{
    ACCOUNT_FIELD_MAX_CHARS, MSG_BAD_CREDENTIALS, MSG_DUPLICATE_EMAIL, MSG_EMAIL,
};
use crate::inbound::http::test_utils::{location, page_app, session_cookie};
use crate::test_support::InMemoryApp;

const PASSWORD: &str = "pa55word";

async fn body_text(res: ServiceResponse) -> String {
    String::from_utf8(test::read_body(res).await.to_vec()).expect("utf-8 body")
}

fn signup_request(email: &str, password: &str) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/user/signup")
        .set_form([("name", "Alice"), ("email", email), ("password", password)])
        .to_request()
}

fn login_request(email: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/user/login")
        .set_form([("email", email), ("password", password)])
}

async fn signed_up<S>(app: &S, email: &str)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(app, signup_request(email, PASSWORD)).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
}

async fn logged_in<S>(app: &S, email: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(app, login_request(email, PASSWORD).to_request()).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    session_cookie(&res).expect("session cookie after login")
}

#[actix_web::test]
async fn signup_redirects_to_login_with_flash() {
    let fixture = InMemoryApp::new();
    let app = test::init_service(page_app(fixture.state.clone())).await;

    let res = test::call_service(&app, signup_request("alice@example.com", PASSWORD)).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res).as_deref(), Some("/user/login"));
    let cookie = session_cookie(&res).expect("flash cookie");
    let page = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/user/login")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert!(body_text(page).await.contains(SIGNUP_FLASH));
}

#[actix_web::test]
async fn duplicate_email_is_reported_on_the_field() {
    let fixture = InMemoryApp::new();
    let app = test::init_service(page_app(fixture.state.clone())).await;
    signed_up(&app, "alice@example.com").await;

    let res = test::call_service(&app, signup_request("alice@example.com", PASSWORD)).await;

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(res).await;
    assert!(html.contains(MSG_DUPLICATE_EMAIL));
    assert!(html.contains("value='alice@example.com'"));
}

#[rstest]
#[case("not-an-email", PASSWORD, MSG_EMAIL)]
#[case("alice@example.com", "short", "at least 8 characters")]
#[actix_web::test]
async fn invalid_signup_is_re_rendered(
    #[case] email: &str,
    #[case] password: &str,
    #[case] message: &str,
) {
    let fixture = InMemoryApp::new();
    let app = test::init_service(page_app(fixture.state.clone())).await;

    let res = test::call_service(&app, signup_request(email, password)).await;

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(res).await.contains(message));
}

#[actix_web::test]
async fn oversized_name_is_rejected_before_insert() {
    let fixture = InMemoryApp::new();
    let app = test::init_service(page_app(fixture.state.clone())).await;
    let name = "n".repeat(ACCOUNT_FIELD_MAX_CHARS + 1);

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/user/signup")
            .set_form([
                ("name", name.as_str()),
                ("email", "alice@example.com"),
                ("password", PASSWORD),
            ])
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(res).await.contains("more than 255 characters"));
    signed_up(&app, "alice@example.com").await;
}

#[actix_web::test]
async fn login_redirects_to_create_and_authenticates_pages() {
    let fixture = InMemoryApp::new();
    let app = test::init_service(page_app(fixture.state.clone())).await;
    signed_up(&app, "alice@example.com").await;

    let res = test::call_service(
        &app,
        login_request("alice@example.com", PASSWORD).to_request(),
    )
    .await;
    assert_eq!(location(&res).as_deref(), Some("/snippet/create"));
    let cookie = session_cookie(&res).expect("session cookie after login");

    let home = test::call_service(
        &app,
        test::TestRequest::get().uri("/").cookie(cookie).to_request(),
    )
    .await;
    let html = body_text(home).await;
    assert!(html.contains("action='/user/logout'"));
    assert!(!html.contains("href='/user/login'"));
}

#[rstest]
#[case("alice@example.com", "wrong-password")]
#[case("nobody@example.com", PASSWORD)]
#[actix_web::test]
async fn bad_credentials_share_one_message(#[case] email: &str, #[case] password: &str) {
    let fixture = InMemoryApp::new();
    let app = test::init_service(page_app(fixture.state.clone())).await;
    signed_up(&app, "alice@example.com").await;

    let res = test::call_service(&app, login_request(email, password).to_request()).await;

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(session_cookie(&res).is_none());
    let html = body_text(res).await;
    assert!(html.contains(MSG_BAD_CREDENTIALS));
    assert!(!html.contains("wrong-password"));
}

#[actix_web::test]
async fn logout_forgets_user_and_flashes() {
    let fixture = InMemoryApp::new();
    let app = test::init_service(page_app(fixture.state.clone())).await;
    signed_up(&app, "alice@example.com").await;
    let cookie = logged_in(&app, "alice@example.com").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/user/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res).as_deref(), Some("/"));
    let after = session_cookie(&res).expect("renewed session");

    let home = test::call_service(
        &app,
        test::TestRequest::get().uri("/").cookie(after).to_request(),
    )
    .await;
    let html = body_text(home).await;
    assert!(html.contains("logged out successfully!"));
    assert!(html.contains("href='/user/login'"));
}

#[actix_web::test]
async fn session_for_missing_user_is_anonymous() {
    let fixture = InMemoryApp::new();
    let app = test::init_service(page_app(fixture.state.clone()).route(
        "/as-ghost",
        actix_web::web::get().to(|session: actix_session::Session| async move {
            session
                .insert(crate::inbound::http::session::USER_ID_KEY, 42_i64)
                .expect("insert raw id");
            actix_web::HttpResponse::Ok()
        }),
    ))
    .await;
    let planted =
        test::call_service(&app, test::TestRequest::get().uri("/as-ghost").to_request()).await;
    let cookie = session_cookie(&planted).expect("planted session");

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/").cookie(cookie).to_request(),
    )
    .await;

    let html = body_text(res).await;
    assert!(html.contains("href='/user/login'"));
    assert!(!html.contains("action='/user/logout'"));
}
