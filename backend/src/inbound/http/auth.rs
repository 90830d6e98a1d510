//! Authentication API handlers.
//!
//! ```text
//! GET,POST /auth/login/   establish a session
//! GET,POST /auth/logout/  end the session
//! GET,POST /auth/signup/  create an account and log in
//! ```
//!
//! All three are public. Login honours a `next` query parameter so the
//! redirect-to-login flow lands back on the page that required it.

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, route, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Credentials, CredentialsValidationError, Error};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, NOTES_PATH};

/// Request body for login and signup.
///
/// Example JSON: `{"username":"Лев Толстой","password":"secret"}`
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

impl TryFrom<CredentialsForm> for Credentials {
    type Error = CredentialsValidationError;

    fn try_from(value: CredentialsForm) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Optional destination to return to after a successful login.
#[derive(Debug, Deserialize)]
pub struct NextQuery {
    next: Option<String>,
}

/// Only follow app-relative destinations; anything else falls back to the
/// notes list so the login page cannot be used as an open redirect.
fn sanitize_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path,
        _ => NOTES_PATH,
    }
}

fn map_credentials_error(err: CredentialsValidationError) -> Error {
    let field = match err {
        CredentialsValidationError::Username(_) => "username",
        CredentialsValidationError::EmptyPassword => "password",
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

/// Blank login form.
#[utoipa::path(
    get,
    path = "/auth/login/",
    responses((status = 200, description = "Empty login form")),
    tags = ["auth"],
    operation_id = "loginForm",
    security([])
)]
#[get("/login/")]
pub async fn login_form() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "form": { "username": "", "password": "" } }))
}

/// Authenticate and establish a session, then follow `next`.
#[utoipa::path(
    post,
    path = "/auth/login/",
    request_body = CredentialsForm,
    params(("next" = Option<String>, Query, description = "Destination after login")),
    responses(
        (status = 302, description = "Logged in; redirect to `next` or the notes list"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login/")]
pub async fn login(
    session: SessionContext,
    state: web::Data<HttpState>,
    query: web::Query<NextQuery>,
    payload: web::Json<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let credentials =
        Credentials::try_from(payload.into_inner()).map_err(map_credentials_error)?;
    let user_id = state.accounts.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, sanitize_next(query.next.as_deref())))
        .finish())
}

/// End the current session.
///
/// Idempotent: logging out without a session is still a success.
#[utoipa::path(
    post,
    path = "/auth/logout/",
    responses((status = 200, description = "Session cleared")),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[route("/logout/", method = "GET", method = "POST")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::Ok().json(json!({ "message": "logged out" }))
}

/// Blank signup form.
#[utoipa::path(
    get,
    path = "/auth/signup/",
    responses((status = 200, description = "Empty signup form")),
    tags = ["auth"],
    operation_id = "signupForm",
    security([])
)]
#[get("/signup/")]
pub async fn signup_form() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "form": { "username": "", "password": "" } }))
}

/// Create an account, log it in, and land on the notes list.
#[utoipa::path(
    post,
    path = "/auth/signup/",
    request_body = CredentialsForm,
    responses(
        (status = 302, description = "Account created; redirect to the notes list"),
        (status = 400, description = "Invalid or duplicate username", body = Error)
    ),
    tags = ["auth"],
    operation_id = "signup",
    security([])
)]
#[post("/signup/")]
pub async fn signup(
    session: SessionContext,
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let credentials =
        Credentials::try_from(payload.into_inner()).map_err(map_credentials_error)?;
    let user_id = state.accounts.sign_up(&credentials).await?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, NOTES_PATH))
        .finish())
}
