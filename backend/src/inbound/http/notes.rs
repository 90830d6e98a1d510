//! Notes API handlers.
//!
//! ```text
//! GET  /notes/                 caller's notes
//! POST /notes/add/             create, then redirect to /notes/success/
//! GET  /notes/{slug}/          detail (owner only)
//! POST /notes/{slug}/edit/     edit, then redirect to /notes/success/
//! POST /notes/{slug}/delete/   delete, then redirect to /notes/success/
//! ```
//!
//! Anonymous requests to any of these are answered with a redirect to the
//! login page carrying the original path in `next`.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, get, post, route, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, Note, NoteDraft};
use crate::inbound::http::error::with_login_next;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, SUCCESS_PATH};

/// Request body for create and edit.
///
/// Example JSON: `{"title":"Заголовок","text":"Текст"}` — `slug` is optional
/// and derived from the title when omitted.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct NoteForm {
    pub title: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

impl From<NoteForm> for NoteDraft {
    fn from(value: NoteForm) -> Self {
        Self {
            title: value.title,
            text: value.text,
            slug: value.slug,
        }
    }
}

/// Note representation returned to its owner.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteDto {
    #[schema(example = "7c9e6679-7425-40de-944b-e07fc1f90ae7")]
    pub id: String,
    #[schema(example = "Заголовок")]
    pub title: String,
    pub text: String,
    #[schema(example = "zagolovok")]
    pub slug: String,
}

impl From<&Note> for NoteDto {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id().to_string(),
            title: note.title().as_ref().to_owned(),
            text: note.text().to_owned(),
            slug: note.slug().as_ref().to_owned(),
        }
    }
}

/// Form descriptor returned by the GET variants of add and edit.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NoteFormDto {
    pub form: NoteForm,
}

fn redirect_to_success() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, SUCCESS_PATH))
        .finish()
}

fn require_login(req: &HttpRequest) -> impl Fn(Error) -> Error + '_ {
    move |error| with_login_next(error, req.path())
}

/// List the caller's own notes.
#[utoipa::path(
    get,
    path = "/notes/",
    responses(
        (status = 200, description = "Caller's notes", body = [NoteDto]),
        (status = 302, description = "Not authenticated; redirect to login"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["notes"],
    operation_id = "listNotes"
)]
#[get("/")]
pub async fn list_notes(
    req: HttpRequest,
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<NoteDto>>> {
    let identity = session.identity()?;
    let notes = state
        .notes
        .list(&identity)
        .await
        .map_err(require_login(&req))?;
    Ok(web::Json(notes.iter().map(NoteDto::from).collect()))
}

/// Blank form for creating a note.
#[utoipa::path(
    get,
    path = "/notes/add/",
    responses(
        (status = 200, description = "Empty note form", body = NoteFormDto),
        (status = 302, description = "Not authenticated; redirect to login")
    ),
    tags = ["notes"],
    operation_id = "addNoteForm"
)]
#[get("/add/")]
pub async fn add_note_form(req: HttpRequest, session: SessionContext) -> ApiResult<HttpResponse> {
    let identity = session.identity()?;
    identity.require_user().map_err(require_login(&req))?;
    Ok(HttpResponse::Ok().json(NoteFormDto {
        form: NoteForm {
            title: String::new(),
            text: String::new(),
            slug: None,
        },
    }))
}

/// Create a note owned by the caller.
#[utoipa::path(
    post,
    path = "/notes/add/",
    request_body = NoteForm,
    responses(
        (status = 302, description = "Created; redirect to the success page"),
        (status = 400, description = "Invalid title or slug", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["notes"],
    operation_id = "addNote"
)]
#[post("/add/")]
pub async fn add_note(
    req: HttpRequest,
    session: SessionContext,
    state: web::Data<HttpState>,
    payload: web::Json<NoteForm>,
) -> ApiResult<HttpResponse> {
    let identity = session.identity()?;
    state
        .notes
        .create(&identity, payload.into_inner().into())
        .await
        .map_err(require_login(&req))?;
    Ok(redirect_to_success())
}

/// Post-action landing page.
#[utoipa::path(
    get,
    path = "/notes/success/",
    responses(
        (status = 200, description = "Landing payload"),
        (status = 302, description = "Not authenticated; redirect to login")
    ),
    tags = ["notes"],
    operation_id = "noteSuccess"
)]
#[get("/success/")]
pub async fn success(req: HttpRequest, session: SessionContext) -> ApiResult<HttpResponse> {
    let identity = session.identity()?;
    identity.require_user().map_err(require_login(&req))?;
    Ok(HttpResponse::Ok().json(json!({ "message": "done" })))
}

/// Show one of the caller's notes.
#[utoipa::path(
    get,
    path = "/notes/{slug}/",
    params(("slug" = String, Path, description = "Note slug")),
    responses(
        (status = 200, description = "Note detail", body = NoteDto),
        (status = 302, description = "Not authenticated; redirect to login"),
        (status = 404, description = "Absent, or owned by someone else", body = Error)
    ),
    tags = ["notes"],
    operation_id = "noteDetail"
)]
#[get("/{slug}/")]
pub async fn note_detail(
    req: HttpRequest,
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<NoteDto>> {
    let identity = session.identity()?;
    let note = state
        .notes
        .view(&identity, &path.into_inner())
        .await
        .map_err(require_login(&req))?;
    Ok(web::Json(NoteDto::from(&note)))
}

/// Pre-filled form for editing a note.
#[utoipa::path(
    get,
    path = "/notes/{slug}/edit/",
    params(("slug" = String, Path, description = "Note slug")),
    responses(
        (status = 200, description = "Form with current values", body = NoteFormDto),
        (status = 302, description = "Not authenticated; redirect to login"),
        (status = 404, description = "Absent, or owned by someone else", body = Error)
    ),
    tags = ["notes"],
    operation_id = "editNoteForm"
)]
#[get("/{slug}/edit/")]
pub async fn edit_note_form(
    req: HttpRequest,
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<NoteFormDto>> {
    let identity = session.identity()?;
    let note = state
        .notes
        .view(&identity, &path.into_inner())
        .await
        .map_err(require_login(&req))?;
    Ok(web::Json(NoteFormDto {
        form: NoteForm {
            title: note.title().as_ref().to_owned(),
            text: note.text().to_owned(),
            slug: Some(note.slug().as_ref().to_owned()),
        },
    }))
}

/// Edit one of the caller's notes.
#[utoipa::path(
    post,
    path = "/notes/{slug}/edit/",
    params(("slug" = String, Path, description = "Note slug")),
    request_body = NoteForm,
    responses(
        (status = 302, description = "Edited; redirect to the success page"),
        (status = 400, description = "Invalid title or slug", body = Error),
        (status = 404, description = "Absent, or owned by someone else", body = Error)
    ),
    tags = ["notes"],
    operation_id = "editNote"
)]
#[post("/{slug}/edit/")]
pub async fn edit_note(
    req: HttpRequest,
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<NoteForm>,
) -> ApiResult<HttpResponse> {
    let identity = session.identity()?;
    state
        .notes
        .edit(&identity, &path.into_inner(), payload.into_inner().into())
        .await
        .map_err(require_login(&req))?;
    Ok(redirect_to_success())
}

/// Delete one of the caller's notes.
#[utoipa::path(
    post,
    path = "/notes/{slug}/delete/",
    params(("slug" = String, Path, description = "Note slug")),
    responses(
        (status = 302, description = "Deleted; redirect to the success page"),
        (status = 404, description = "Absent, or owned by someone else", body = Error)
    ),
    tags = ["notes"],
    operation_id = "deleteNote"
)]
#[route("/{slug}/delete/", method = "POST", method = "DELETE")]
pub async fn delete_note(
    req: HttpRequest,
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let identity = session.identity()?;
    state
        .notes
        .delete(&identity, &path.into_inner())
        .await
        .map_err(require_login(&req))?;
    Ok(redirect_to_success())
}
