use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

use crate::{error::AppError, store::Store};

/// Liveness probe for the tracker.
///
/// Reads the store under its lock, so a poisoned store answers `500` rather than
/// `ok`. The body carries how many users, projects and tasks the server holds.
#[get("/health")]
pub async fn health(store: web::Data<Store>) -> Result<impl Responder, AppError> {
    Ok(HttpResponse::Ok().json(json!({
        "status": "ok",
        "timestamp": Utc::now(),
        "store": {
            "users": store.user_count()?,
            "projects": store.project_count()?,
            "tasks": store.task_count()?,
        }
    })))
}
