#![allow(dead_code)]

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::middleware::Logger;
use actix_web::{test, web, App, Error};
use serde_json::{json, Value};
use taskboard::auth::{AuthResponse, ContextResolver, OwnershipPolicy, TokenService};
use taskboard::routes::{self, health};
use taskboard::store::Store;

pub const TEST_SECRET: &str = "integration-test-secret";

/// bcrypt's minimum cost keeps registration fast in tests.
const TEST_BCRYPT_COST: u32 = 4;

pub fn test_store(policy: OwnershipPolicy) -> web::Data<Store> {
    web::Data::new(Store::new(
        TokenService::new(TEST_SECRET, 24),
        TEST_BCRYPT_COST,
        policy,
    ))
}

/// Builds the application the same way `main` does, around the given store.
pub async fn init_app(
    store: web::Data<Store>,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    test::init_service(
        App::new()
            .app_data(store)
            .wrap(Logger::default())
            .service(health::health)
            .service(
                web::scope("/api")
                    .wrap(ContextResolver)
                    .configure(routes::config),
            ),
    )
    .await
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

/// Registers a user and returns the session, panicking with the response body on failure.
pub async fn register_user<S, B>(
    app: &S,
    username: &str,
    password: &str,
) -> AuthResponse
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;

    assert_eq!(
        status,
        StatusCode::CREATED,
        "Failed to register {}. Body: {:?}",
        username,
        String::from_utf8_lossy(&body)
    );
    serde_json::from_slice(&body).expect("Failed to parse registration response")
}

/// Sends a request and returns its status with the JSON body (`Value::Null` for an empty body).
pub async fn send<S, B>(
    app: &S,
    req: Request,
) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&body).into_owned())
        })
    };
    (status, json)
}

pub async fn create_project<S, B>(
    app: &S,
    token: &str,
    name: &str,
) -> Value
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/projects")
        .append_header(bearer(token))
        .set_json(json!({ "name": name }))
        .to_request();
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::CREATED, "Create project failed: {}", body);
    body
}

pub async fn create_task<S, B>(
    app: &S,
    token: &str,
    project_id: i64,
    title: &str,
) -> Value
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri(&format!("/api/projects/{}/tasks", project_id))
        .append_header(bearer(token))
        .set_json(json!({ "title": title }))
        .to_request();
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::CREATED, "Create task failed: {}", body);
    body
}
