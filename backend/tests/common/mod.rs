//! Shared harness for the HTTP integration suites.

use actix_http::Request;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::{test, web};
use serde_json::json;

use notes_backend::inbound::http::state::HttpState;
use notes_backend::server::build_app;

/// The application service under test.
pub trait TestApp: Service<Request, Response = ServiceResponse, Error = actix_web::Error> {}

impl<S> TestApp for S where S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>
{}

/// Build the full application over fresh in-memory stores.
pub async fn init_app() -> impl TestApp {
    test::init_service(build_app(
        web::Data::new(HttpState::in_memory()),
        Key::generate(),
        false,
    ))
    .await
}

/// Extract the session cookie from a response.
pub fn session_cookie(res: &ServiceResponse) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// The `Location` header of a redirect response.
pub fn location(res: &ServiceResponse) -> String {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("redirect carries a Location header")
        .to_owned()
}

/// Create an account and return the logged-in session cookie.
pub async fn sign_up(app: &impl TestApp, username: &str) -> Cookie<'static> {
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/auth/signup/")
            .set_json(json!({ "username": username, "password": "secret" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND, "signup should redirect");
    session_cookie(&res)
}

/// Create a note as the given session and assert the success redirect.
pub async fn create_note(
    app: &impl TestApp,
    cookie: &Cookie<'static>,
    title: &str,
    text: &str,
    slug: Option<&str>,
) -> ServiceResponse {
    let mut body = json!({ "title": title, "text": text });
    if let Some(slug) = slug {
        body["slug"] = json!(slug);
    }
    test::call_service(
        app,
        test::TestRequest::post()
            .uri("/notes/add/")
            .cookie(cookie.clone())
            .set_json(body)
            .to_request(),
    )
    .await
}

/// Fetch the caller's notes as JSON.
pub async fn list_notes(app: &impl TestApp, cookie: &Cookie<'static>) -> serde_json::Value {
    let res = test::call_service(
        app,
        test::TestRequest::get()
            .uri("/notes/")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = test::read_body(res).await;
    serde_json::from_slice(&body).expect("notes list is JSON")
}
