use crate::{
    auth::{require_authenticated, RequestContext},
    error::AppError,
    models::{ProjectId, ProjectInput, ProjectResponse},
    store::Store,
};
use actix_web::{delete, get, post, web, HttpResponse, Responder};

/// Lists the caller's projects in creation order, each with its owner embedded.
///
/// ## Responses:
/// - `200 OK`: JSON array of projects.
/// - `401 Unauthorized`: If the request carries no resolvable session token.
#[get("")]
pub async fn list_projects(
    store: web::Data<Store>,
    context: RequestContext,
) -> Result<impl Responder, AppError> {
    let user = require_authenticated(&context)?;

    let projects: Vec<ProjectResponse> = store
        .list_projects(user.id)?
        .into_iter()
        .map(|project| ProjectResponse {
            project,
            owner: user.clone(),
        })
        .collect();

    Ok(HttpResponse::Ok().json(projects))
}

/// Creates a project owned by the caller.
///
/// ## Request Body:
/// - `name`: The project name (required, not blank).
///
/// ## Responses:
/// - `201 Created`: The new project with its owner.
/// - `401 Unauthorized`: If the request carries no resolvable session token.
/// - `422 Unprocessable Entity`: If the name is blank.
#[post("")]
pub async fn create_project(
    store: web::Data<Store>,
    context: RequestContext,
    project_data: web::Json<ProjectInput>,
) -> Result<impl Responder, AppError> {
    let user = require_authenticated(&context)?;
    let project = store.create_project(project_data.into_inner(), user.id)?;

    Ok(HttpResponse::Created().json(ProjectResponse {
        project,
        owner: user.clone(),
    }))
}

/// Retrieves one project with its owner and its tasks.
///
/// ## Responses:
/// - `200 OK`: The project.
/// - `401 Unauthorized`: If the request carries no resolvable session token.
/// - `404 Not Found`: If the project does not exist or belongs to someone else.
#[get("/{id}")]
pub async fn get_project(
    store: web::Data<Store>,
    context: RequestContext,
    project_id: web::Path<ProjectId>,
) -> Result<impl Responder, AppError> {
    let user = require_authenticated(&context)?;
    let details = store.get_project(project_id.into_inner(), user.id)?;

    Ok(HttpResponse::Ok().json(details))
}

/// Deletes a project owned by the caller. Its tasks are not removed.
///
/// ## Responses:
/// - `200 OK`: `true`.
/// - `401 Unauthorized`: If the request carries no resolvable session token.
/// - `404 Not Found`: If the project does not exist or belongs to someone else.
#[delete("/{id}")]
pub async fn delete_project(
    store: web::Data<Store>,
    context: RequestContext,
    project_id: web::Path<ProjectId>,
) -> Result<impl Responder, AppError> {
    let user = require_authenticated(&context)?;
    let deleted = store.delete_project(project_id.into_inner(), user.id)?;

    Ok(HttpResponse::Ok().json(deleted))
}
