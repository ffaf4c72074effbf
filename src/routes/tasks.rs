use crate::{
    auth::{require_authenticated, RequestContext},
    error::AppError,
    models::{ProjectId, StatusUpdate, TaskId, TaskInput, TaskQuery},
    store::Store,
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};

/// Lists the tasks of one of the caller's projects.
///
/// ## Query Parameters:
/// - `status` (optional): `TODO`, `IN_PROGRESS` or `DONE`; exact match.
/// - `offset` (optional): number of matching tasks to skip.
/// - `limit` (optional): maximum number of tasks to return.
///
/// ## Responses:
/// - `200 OK`: JSON array of tasks in creation order, each with its `project`.
/// - `401 Unauthorized`: If the request carries no resolvable session token.
/// - `404 Not Found`: If the project does not exist or belongs to someone else.
#[get("/{id}/tasks")]
pub async fn list_tasks(
    store: web::Data<Store>,
    context: RequestContext,
    project_id: web::Path<ProjectId>,
    query_params: web::Query<TaskQuery>,
) -> Result<impl Responder, AppError> {
    let user = require_authenticated(&context)?;
    let tasks = store.list_tasks(project_id.into_inner(), user.id, &query_params)?;

    Ok(HttpResponse::Ok().json(store.with_projects(tasks)?))
}

/// Adds a task to one of the caller's projects.
///
/// ## Request Body:
/// - `title`: The task title (required, not blank).
/// - `status` (optional): ignored; every new task starts as `TODO`.
///
/// ## Responses:
/// - `201 Created`: The new task, with its `project`.
/// - `401 Unauthorized`: If the request carries no resolvable session token.
/// - `404 Not Found`: If the project does not exist or belongs to someone else.
/// - `422 Unprocessable Entity`: If the title is blank.
#[post("/{id}/tasks")]
pub async fn create_task(
    store: web::Data<Store>,
    context: RequestContext,
    project_id: web::Path<ProjectId>,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    let user = require_authenticated(&context)?;
    let task = store.create_task(project_id.into_inner(), task_data.into_inner(), user.id)?;

    Ok(HttpResponse::Created().json(store.with_project(task)?))
}

/// Moves a task to any status.
///
/// ## Responses:
/// - `200 OK`: The updated task, with its `project`.
/// - `401 Unauthorized`: If the request carries no resolvable session token.
/// - `403 Forbidden`: Foreign task, when the server runs with the `reveal` ownership policy.
/// - `404 Not Found`: Unknown task, or a foreign task under the default policy.
#[patch("/{id}/status")]
pub async fn update_task_status(
    store: web::Data<Store>,
    context: RequestContext,
    task_id: web::Path<TaskId>,
    update: web::Json<StatusUpdate>,
) -> Result<impl Responder, AppError> {
    let user = require_authenticated(&context)?;
    let task = store.update_task_status(task_id.into_inner(), update.status, user.id)?;

    Ok(HttpResponse::Ok().json(store.with_project(task)?))
}

/// Deletes a task.
///
/// ## Responses:
/// - `200 OK`: `true`.
/// - `401 Unauthorized`: If the request carries no resolvable session token.
/// - `403 Forbidden`: Foreign task, when the server runs with the `reveal` ownership policy.
/// - `404 Not Found`: Unknown task, or a foreign task under the default policy.
#[delete("/{id}")]
pub async fn delete_task(
    store: web::Data<Store>,
    context: RequestContext,
    task_id: web::Path<TaskId>,
) -> Result<impl Responder, AppError> {
    let user = require_authenticated(&context)?;
    let deleted = store.delete_task(task_id.into_inner(), user.id)?;

    Ok(HttpResponse::Ok().json(deleted))
}
