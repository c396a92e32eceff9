//! End-to-end page flows through the fully wired application.
//!
//! Runs the production middleware stack (tracing, security headers, private
//! cookie session) over in-memory ports.

use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{test, web};
use rstest::rstest;

use snippetbox::inbound::http::health::HealthState;
use snippetbox::middleware::trace::TRACE_ID_HEADER;
use snippetbox::server::{AppDependencies, build_app};
use snippetbox::test_support::InMemoryApp;

fn dependencies(fixture: &InMemoryApp, health_state: web::Data<HealthState>) -> AppDependencies {
    AppDependencies {
        health_state,
        http_state: web::Data::new(fixture.state.clone()),
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    }
}

/// Cookie jar holding the single session cookie between requests.
#[derive(Default)]
struct Jar(Option<Cookie<'static>>);

impl Jar {
    fn attach(&self, req: test::TestRequest) -> test::TestRequest {
        match &self.0 {
            Some(cookie) => req.cookie(cookie.clone()),
            None => req,
        }
    }

    fn store(&mut self, res: &ServiceResponse) {
        if let Some(cookie) = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
        {
            self.0 = Some(cookie.into_owned());
        }
    }
}

async fn send<S>(app: &S, jar: &mut Jar, req: test::TestRequest) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(app, jar.attach(req).to_request()).await;
    jar.store(&res);
    res
}

async fn text(res: ServiceResponse) -> String {
    String::from_utf8(test::read_body(res).await.to_vec()).expect("utf-8 body")
}

fn location(res: &ServiceResponse) -> Option<&str> {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

#[actix_web::test]
async fn visitor_signs_up_logs_in_creates_and_logs_out() {
    let fixture = InMemoryApp::new();
    let app = test::init_service(build_app(dependencies(
        &fixture,
        web::Data::new(HealthState::new()),
    )))
    .await;
    let mut jar = Jar::default();

    let signup = send(
        &app,
        &mut jar,
        test::TestRequest::post().uri("/user/signup").set_form([
            ("name", "Alice"),
            ("email", "alice@example.com"),
            ("password", "pa55word"),
        ]),
    )
    .await;
    assert_eq!(signup.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&signup), Some("/user/login"));

    let login_page = send(&app, &mut jar, test::TestRequest::get().uri("/user/login")).await;
    assert!(text(login_page).await.contains("Your signup was successful. Please log in."));

    let login = send(
        &app,
        &mut jar,
        test::TestRequest::post()
            .uri("/user/login")
            .set_form([("email", "alice@example.com"), ("password", "pa55word")]),
    )
    .await;
    assert_eq!(login.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&login), Some("/snippet/create"));

    let created = send(
        &app,
        &mut jar,
        test::TestRequest::post().uri("/snippet/create").set_form([
            ("title", "An old silent pond"),
            ("content", "A frog jumps into the pond,\nsplash! Silence again."),
            ("expires", "365"),
        ]),
    )
    .await;
    assert_eq!(created.status(), StatusCode::SEE_OTHER);
    let view_path = location(&created).expect("redirect target").to_owned();
    assert_eq!(view_path, "/snippet/view/1");

    let view = send(&app, &mut jar, test::TestRequest::get().uri(&view_path)).await;
    assert_eq!(view.status(), StatusCode::OK);
    let html = text(view).await;
    assert!(html.contains("Snippet successfully created!"));
    assert!(html.contains("An old silent pond"));
    assert!(html.contains("action='/user/logout'"));

    let logout = send(&app, &mut jar, test::TestRequest::post().uri("/user/logout")).await;
    assert_eq!(location(&logout), Some("/"));

    let home = send(&app, &mut jar, test::TestRequest::get().uri("/")).await;
    let html = text(home).await;
    assert!(html.contains("logged out successfully!"));
    assert!(html.contains("href='/user/login'"));
    assert!(html.contains("An old silent pond"));
}

#[actix_web::test]
async fn responses_carry_trace_and_security_headers() {
    let fixture = InMemoryApp::new();
    let app = test::init_service(build_app(dependencies(
        &fixture,
        web::Data::new(HealthState::new()),
    )))
    .await;

    let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

    assert_eq!(res.status(), StatusCode::OK);
    let headers = res.headers();
    assert!(headers.contains_key(TRACE_ID_HEADER));
    assert!(headers.contains_key(header::CONTENT_SECURITY_POLICY));
    assert_eq!(
        headers
            .get(header::X_FRAME_OPTIONS)
            .and_then(|v| v.to_str().ok()),
        Some("deny")
    );
    assert_eq!(
        headers
            .get(header::X_CONTENT_TYPE_OPTIONS)
            .and_then(|v| v.to_str().ok()),
        Some("nosniff")
    );
}

#[actix_web::test]
async fn error_pages_are_plain_status_text() {
    let fixture = InMemoryApp::new();
    let app = test::init_service(build_app(dependencies(
        &fixture,
        web::Data::new(HealthState::new()),
    )))
    .await;

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/snippet/view/42").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
    assert_eq!(text(res).await, "Not Found");
}

#[actix_web::test]
async fn login_cookie_is_http_only_and_encrypted() {
    let fixture = InMemoryApp::new();
    let app = test::init_service(build_app(dependencies(
        &fixture,
        web::Data::new(HealthState::new()),
    )))
    .await;
    let mut jar = Jar::default();
    send(
        &app,
        &mut jar,
        test::TestRequest::post().uri("/user/signup").set_form([
            ("name", "Bob"),
            ("email", "bob@example.com"),
            ("password", "pa55word"),
        ]),
    )
    .await;

    let login = send(
        &app,
        &mut jar,
        test::TestRequest::post()
            .uri("/user/login")
            .set_form([("email", "bob@example.com"), ("password", "pa55word")]),
    )
    .await;

    let cookie = jar.0.clone().expect("session cookie");
    assert_eq!(login.status(), StatusCode::SEE_OTHER);
    assert_eq!(cookie.http_only(), Some(true));
    assert!(!cookie.value().contains("authenticated_user_id"));
}

#[rstest]
#[case(false, StatusCode::SERVICE_UNAVAILABLE)]
#[case(true, StatusCode::OK)]
#[actix_web::test]
async fn readiness_probe_reflects_startup(#[case] ready: bool, #[case] expected: StatusCode) {
    let fixture = InMemoryApp::new();
    let health_state = web::Data::new(HealthState::new());
    if ready {
        health_state.mark_ready();
    }
    let app = test::init_service(build_app(dependencies(&fixture, health_state))).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/health/ready").to_request(),
    )
    .await;

    assert_eq!(res.status(), expected);
}
