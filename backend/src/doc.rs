//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the notes routes. The document is served at
//! `/api-docs/openapi.json` in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /auth/login/.",
            ))),
        );
    }
}

/// OpenAPI document for the notes API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Notes backend API",
        description = "Session-authenticated CRUD over personal notes addressed by slug."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::pages::home,
        crate::inbound::http::auth::login_form,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::signup_form,
        crate::inbound::http::auth::signup,
        crate::inbound::http::notes::list_notes,
        crate::inbound::http::notes::add_note_form,
        crate::inbound::http::notes::add_note,
        crate::inbound::http::notes::success,
        crate::inbound::http::notes::note_detail,
        crate::inbound::http::notes::edit_note_form,
        crate::inbound::http::notes::edit_note,
        crate::inbound::http::notes::delete_note,
    ),
    components(schemas(
        crate::domain::Error,
        crate::domain::ErrorCode,
        crate::inbound::http::auth::CredentialsForm,
        crate::inbound::http::notes::NoteForm,
        crate::inbound::http::notes::NoteFormDto,
        crate::inbound::http::notes::NoteDto,
    ))
)]
pub struct ApiDoc;
