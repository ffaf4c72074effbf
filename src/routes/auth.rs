use crate::{
    auth::{LoginRequest, RegisterRequest, RequestContext},
    error::AppError,
    store::Store,
};
use actix_web::{get, post, web, HttpResponse, Responder};

/// Register a new user
///
/// Creates a new user account and returns a session token.
/// Hashing runs on the blocking pool so the worker thread stays responsive.
///
/// ## Responses:
/// - `201 Created`: `{ "token": ..., "user_id": ... }`.
/// - `409 Conflict`: If the username is taken.
/// - `422 Unprocessable Entity`: Blank username or password shorter than 6 characters.
#[post("/register")]
pub async fn register(
    store: web::Data<Store>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    let request = register_data.into_inner();
    let session = web::block(move || store.register(request)).await??;

    Ok(HttpResponse::Created().json(session))
}

/// Login user
///
/// Authenticates a user and returns a session token.
///
/// ## Responses:
/// - `200 OK`: `{ "token": ..., "user_id": ... }`.
/// - `401 Unauthorized`: `Invalid credentials`, for an unknown user and a wrong password alike.
#[post("/login")]
pub async fn login(
    store: web::Data<Store>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let request = login_data.into_inner();
    let session = web::block(move || store.login(request)).await??;

    Ok(HttpResponse::Ok().json(session))
}

/// Returns the caller's user record, or `null` for an anonymous request.
#[get("/me")]
pub async fn me(context: RequestContext) -> impl Responder {
    HttpResponse::Ok().json(context.into_user())
}
