//! Server construction and middleware wiring.
//!
//! `build_app` is the single wiring path shared by `main` and the
//! integration tests, so route registration and session configuration can
//! never drift between the two.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use std::net::SocketAddr;

use crate::inbound::http::state::HttpState;
use crate::inbound::http::{auth, notes, pages};

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub key: Key,
    pub cookie_secure: bool,
    pub bind_addr: SocketAddr,
}

/// Assemble the application with session middleware and all routes.
///
/// Within the `/notes` scope the fixed paths (`/`, `/add/`, `/success/`)
/// register before the `{slug}` matchers; Actix resolves routes in
/// registration order, so a note slugged `add` can never shadow the create
/// endpoint.
pub fn build_app(
    state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(SameSite::Lax)
        .build();

    let app = App::new()
        .app_data(state)
        .wrap(session)
        .service(pages::home)
        .service(
            web::scope("/auth")
                .service(auth::login_form)
                .service(auth::login)
                .service(auth::logout)
                .service(auth::signup_form)
                .service(auth::signup),
        )
        .service(
            web::scope("/notes")
                .service(notes::list_notes)
                .service(notes::add_note_form)
                .service(notes::add_note)
                .service(notes::success)
                .service(notes::note_detail)
                .service(notes::edit_note_form)
                .service(notes::edit_note)
                .service(notes::delete_note),
        );

    #[cfg(debug_assertions)]
    let app = app.route("/api-docs/openapi.json", web::get().to(openapi_json));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

#[cfg(debug_assertions)]
async fn openapi_json() -> web::Json<utoipa::openapi::OpenApi> {
    use utoipa::OpenApi;

    web::Json(crate::doc::ApiDoc::openapi())
}

/// Construct an Actix HTTP server over the given state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(state: HttpState, config: ServerConfig) -> std::io::Result<Server> {
    let state = web::Data::new(state);
    let ServerConfig {
        key,
        cookie_secure,
        bind_addr,
    } = config;

    let server = HttpServer::new(move || build_app(state.clone(), key.clone(), cookie_secure))
        .bind(bind_addr)?
        .run();
    Ok(server)
}
