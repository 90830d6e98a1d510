//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses, status
//! codes, and — for unauthenticated browsing flows — the redirect to the
//! login page that carries the originally requested path.

use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use tracing::error;

use crate::domain::{Error, ErrorCode};

use super::LOGIN_PATH;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Attach the originally requested path to a not-authenticated error so the
/// response becomes a login redirect preserving the destination.
///
/// Errors of any other kind pass through untouched, so handlers can apply
/// this uniformly to every auth-required route.
pub fn with_login_next(error: Error, next: &str) -> Error {
    if error.code() == ErrorCode::Unauthorized {
        error.with_details(json!({ "next": next }))
    } else {
        error
    }
}

fn login_next(error: &Error) -> Option<&str> {
    if error.code() != ErrorCode::Unauthorized {
        return None;
    }
    error.details()?.get("next")?.as_str()
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        Error::internal("Internal server error")
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        if login_next(self).is_some() {
            StatusCode::FOUND
        } else {
            status_for(self.code())
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let Some(next) = login_next(self) {
            return HttpResponse::Found()
                .insert_header((header::LOCATION, format!("{LOGIN_PATH}?next={next}")))
                .finish();
        }

        HttpResponse::build(self.status_code()).json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}
