//! Public pages that carry no note state.

use actix_web::{HttpResponse, get};
use serde_json::json;

/// Public home page.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Home payload")),
    tags = ["pages"],
    operation_id = "home",
    security([])
)]
#[get("/")]
pub async fn home() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": "personal notes" }))
}
