pub mod auth;
pub mod health;
pub mod projects;
pub mod tasks;

use actix_web::web;

/// Registers every `/api` route. The caller wraps the scope in `ContextResolver`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::login)
            .service(auth::register),
    )
    .service(auth::me)
    .service(
        web::scope("/projects")
            .service(projects::list_projects)
            .service(projects::create_project)
            .service(projects::get_project)
            .service(projects::delete_project)
            .service(tasks::list_tasks)
            .service(tasks::create_task),
    )
    .service(
        web::scope("/tasks")
            .service(tasks::update_task_status)
            .service(tasks::delete_task),
    );
}
